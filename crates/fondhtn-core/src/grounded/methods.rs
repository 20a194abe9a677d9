//! Method record decoding
//!
//! Each method is a 4-line record: name, abstract task id, `-1` terminated
//! subtask ids and a `-1` terminated flat list of ordering pairs. Task ids
//! use the continuous id space of [`TaskTable`].

use indexmap::IndexMap;
use tracing::debug;

use super::sections::{METHODS, Sections};
use super::tasks::TaskTable;
use super::tokens::Record;
use crate::domain::Method;
use crate::error::{Error, Result};

/// Lines per method record
pub const METHOD_STRIDE: usize = 4;

/// Decode every method record, keyed by method name
///
/// A repeated method name is rejected instead of letting the later record
/// replace the earlier one, which is what a plain name-keyed map would do.
pub fn decode_methods(
    sections: &Sections<'_>,
    tasks: &TaskTable,
) -> Result<IndexMap<String, Method>> {
    let lines = sections.get(METHODS)?;

    if lines.len() % METHOD_STRIDE != 0 {
        return Err(Error::malformed(
            METHODS,
            lines.len() / METHOD_STRIDE,
            format!(
                "{} lines do not divide into {}-line records",
                lines.len(),
                METHOD_STRIDE
            ),
        ));
    }

    let mut methods = IndexMap::with_capacity(lines.len() / METHOD_STRIDE);
    for (index, record) in lines.chunks_exact(METHOD_STRIDE).enumerate() {
        let at = Record::new(METHODS, index);
        let name = record[0].trim();
        if name.is_empty() {
            return Err(at.malformed("method name is empty"));
        }

        let method = decode_method(record, tasks, &at)?;
        if methods.insert(name.to_string(), method).is_some() {
            return Err(at.malformed(format!("duplicate method name '{}'", name)));
        }
    }

    debug!(count = methods.len(), "Decoded methods");
    Ok(methods)
}

fn decode_method(record: &[&str], tasks: &TaskTable, at: &Record<'_>) -> Result<Method> {
    let task = tasks.resolve_abstract(at.single_int(record[1])?, at)?.to_string();

    let subtasks = at
        .id_list(record[2])?
        .into_iter()
        .map(|id| tasks.resolve_name(id, at).map(str::to_string))
        .collect::<Result<Vec<_>>>()?;

    let flat = at.id_list(record[3])?;
    if flat.len() % 2 != 0 {
        return Err(at.malformed(format!(
            "ordering list has an odd number ({}) of positions",
            flat.len()
        )));
    }
    let position = |raw: i64| -> Result<usize> {
        usize::try_from(raw)
            .ok()
            .filter(|&p| p < subtasks.len())
            .ok_or_else(|| at.out_of_range("subtask positions", raw, subtasks.len()))
    };
    let orderings = flat
        .chunks_exact(2)
        .map(|pair| Ok((position(pair[0])?, position(pair[1])?)))
        .collect::<Result<Vec<_>>>()?;

    Ok(Method {
        task,
        subtasks,
        orderings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASKS: [&str; 4] = ["0 pick[x]", "0 drop[x]", "1 root[]", "1 carry[x]"];

    fn decode(methods: &str) -> Result<IndexMap<String, Method>> {
        let text = format!(";; methods\n0\n{}", methods);
        let sections = Sections::split(&text);
        decode_methods(&sections, &TaskTable::classify(&TASKS).unwrap())
    }

    #[test]
    fn test_mixed_subtask_ids_resolve_by_space() {
        let methods = decode("m_carry\n3\n0 1 -1\n0 1 -1\nm_root\n2\n3 -1\n-1").unwrap();

        let carry = &methods["m_carry"];
        assert_eq!(carry.task, "carry[x]");
        assert_eq!(carry.subtasks, vec!["pick[x]", "drop[x]"]);
        assert_eq!(carry.orderings, vec![(0, 1)]);

        let root = &methods["m_root"];
        assert_eq!(root.task, "root[]");
        assert_eq!(root.subtasks, vec!["carry[x]"]);
        assert!(root.orderings.is_empty());
    }

    #[test]
    fn test_first_abstract_id_is_not_primitive() {
        // id == P must land on the first abstract task
        let methods = decode("m\n3\n2 -1\n-1").unwrap();
        assert_eq!(methods["m"].subtasks, vec!["root[]"]);
    }

    #[test]
    fn test_partial_orderings_are_kept_as_pairs() {
        let methods = decode("m\n2\n0 1 3 -1\n0 2 1 2 -1").unwrap();
        let m = &methods["m"];
        assert_eq!(m.orderings, vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn test_method_task_must_be_abstract() {
        assert!(matches!(
            decode("m\n1\n-1\n-1"),
            Err(Error::OutOfRangeIndex {
                table: "abstract tasks",
                ..
            })
        ));
        assert!(matches!(
            decode("m\n9\n-1\n-1"),
            Err(Error::OutOfRangeIndex { .. })
        ));
    }

    #[test]
    fn test_subtask_out_of_range() {
        match decode("ok\n2\n-1\n-1\nbad\n2\n4 -1\n-1") {
            Err(Error::OutOfRangeIndex { record, index, .. }) => {
                assert_eq!(record, 1);
                assert_eq!(index, 4);
            }
            other => panic!("expected OutOfRangeIndex, got {:?}", other),
        }
    }

    #[test]
    fn test_ordering_errors() {
        assert!(matches!(
            decode("m\n2\n0 1 -1\n0 -1"),
            Err(Error::MalformedRecord { .. })
        ));
        assert!(matches!(
            decode("m\n2\n0 1 -1\n0 2 -1"),
            Err(Error::OutOfRangeIndex {
                table: "subtask positions",
                ..
            })
        ));
    }

    #[test]
    fn test_most_negative_task_id_is_out_of_range() {
        assert!(matches!(
            decode("m\n-9223372036854775808\n-1\n-1"),
            Err(Error::OutOfRangeIndex {
                table: "abstract tasks",
                index: i64::MIN,
                ..
            })
        ));
    }

    #[test]
    fn test_stride_and_duplicates() {
        assert!(matches!(
            decode("m\n2\n-1"),
            Err(Error::MalformedRecord { .. })
        ));
        assert!(matches!(
            decode("m\n2\n-1\n-1\nm\n3\n-1\n-1"),
            Err(Error::MalformedRecord { record: 1, .. })
        ));
    }
}
