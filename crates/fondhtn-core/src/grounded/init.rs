//! Initial state and root task resolution

use indexmap::IndexMap;

use super::sections::{INITIAL_ABSTRACT_TASK, INITIAL_STATE, Sections};
use super::tasks::TaskTable;
use super::tokens::{FeatureTable, Record};
use crate::domain::Action;
use crate::error::{Error, Result};

/// Facts true at the start and the root abstract task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialState {
    pub facts: Vec<String>,
    pub root_task: String,
}

/// Resolve the initial state and the initial abstract task
///
/// The root task id is offset by the number of decoded actions. That count
/// has to agree with the primitive task count; a disagreement means the
/// action section and the task table describe different problems.
pub fn resolve_init(
    sections: &Sections<'_>,
    features: &FeatureTable<'_>,
    tasks: &TaskTable,
    actions: &IndexMap<String, Action>,
) -> Result<InitialState> {
    if actions.len() != tasks.primitive_count() {
        return Err(Error::TaskCountMismatch {
            actions: actions.len(),
            primitives: tasks.primitive_count(),
        });
    }

    let at = Record::new(INITIAL_STATE, 0);
    let facts = features.names(&at.id_list(sections.single_line(INITIAL_STATE)?)?, &at)?;

    let at = Record::new(INITIAL_ABSTRACT_TASK, 0);
    let raw = at.single_int(sections.single_line(INITIAL_ABSTRACT_TASK)?)?;
    let offset = raw.saturating_sub(actions.len() as i64);
    let root_task = usize::try_from(offset)
        .ok()
        .and_then(|i| tasks.abstract_tasks().get(i))
        .ok_or_else(|| at.out_of_range("abstract tasks", offset, tasks.abstract_count()))?
        .clone();

    Ok(InitialState { facts, root_task })
}
