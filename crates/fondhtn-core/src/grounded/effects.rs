//! Effect block decoding
//!
//! An effect line is a `-1` terminated stream of self-describing blocks.
//! Each block starts with a condition count `L`, followed by `L` condition
//! feature ids and finally the affected feature id, so a block spans `L + 2`
//! tokens:
//!
//! ```text
//! 0 7          unconditional effect on feature 7
//! 2 3 4 9      feature 9 is affected when features 3 and 4 hold
//! ```
//!
//! The length token itself is never a feature id.

use super::tokens::{FeatureTable, Record, SENTINEL};
use crate::domain::ConditionalEffect;
use crate::error::Result;

/// Decoded contents of one effect line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectBlocks {
    pub unconditional: Vec<String>,
    pub conditional: Vec<ConditionalEffect>,
}

/// Decode one effect line against the feature table
pub fn decode_effect_blocks(
    line: &str,
    features: &FeatureTable<'_>,
    at: &Record<'_>,
) -> Result<EffectBlocks> {
    let mut decoded = EffectBlocks::default();
    let mut tokens = line.split_whitespace();

    loop {
        let Some(token) = tokens.next() else {
            return Err(at.malformed("effect blocks are missing their -1 terminator"));
        };
        let length = at.int(token)?;
        if length == SENTINEL {
            break;
        }
        let conditions = usize::try_from(length)
            .map_err(|_| at.malformed(format!("negative effect block length {}", length)))?;

        let mut next_id = || -> Result<i64> {
            let token = tokens.next().ok_or_else(|| {
                at.malformed(format!(
                    "effect block declares {} conditions but the line ends early",
                    conditions
                ))
            })?;
            at.int(token)
        };
        let condition = (0..conditions)
            .map(|_| next_id())
            .collect::<Result<Vec<i64>>>()?;
        let effect = features.name(next_id()?, at)?.to_string();

        if condition.is_empty() {
            decoded.unconditional.push(effect);
        } else {
            decoded.conditional.push(ConditionalEffect {
                condition: features.names(&condition, at)?,
                effect,
            });
        }
    }

    if let Some(extra) = tokens.next() {
        return Err(at.malformed(format!(
            "unexpected token '{}' after the -1 terminator",
            extra
        )));
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const FEATURES: [&str; 10] = ["f0", "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9"];

    fn decode(line: &str) -> Result<EffectBlocks> {
        let features = FeatureTable::new(&FEATURES);
        decode_effect_blocks(line, &features, &Record::new("actions", 0))
    }

    #[test]
    fn test_empty_effect_line() {
        assert_eq!(decode("-1").unwrap(), EffectBlocks::default());
    }

    #[test]
    fn test_two_token_block_is_unconditional() {
        let effects = decode("0 7 -1").unwrap();
        assert_eq!(effects.unconditional, vec!["f7"]);
        assert!(effects.conditional.is_empty());
    }

    #[test]
    fn test_longer_block_is_conditional() {
        let effects = decode("2 3 4 9 -1").unwrap();
        assert!(effects.unconditional.is_empty());
        assert_eq!(
            effects.conditional,
            vec![ConditionalEffect {
                condition: vec!["f3".to_string(), "f4".to_string()],
                effect: "f9".to_string(),
            }]
        );
    }

    #[test]
    fn test_mixed_blocks_keep_order() {
        let effects = decode("0 1 1 2 5 0 6 -1").unwrap();
        assert_eq!(effects.unconditional, vec!["f1", "f6"]);
        assert_eq!(effects.conditional.len(), 1);
        assert_eq!(effects.conditional[0].condition, vec!["f2"]);
        assert_eq!(effects.conditional[0].effect, "f5");
    }

    #[test]
    fn test_out_of_range_feature() {
        assert!(matches!(
            decode("0 10 -1"),
            Err(Error::OutOfRangeIndex { index: 10, len: 10, .. })
        ));
        assert!(matches!(
            decode("1 12 3 -1"),
            Err(Error::OutOfRangeIndex { index: 12, .. })
        ));
    }

    #[test]
    fn test_truncated_block() {
        assert!(matches!(decode("2 3 -1"), Err(Error::MalformedRecord { .. })));
        assert!(matches!(decode("2 3"), Err(Error::MalformedRecord { .. })));
    }

    #[test]
    fn test_missing_terminator() {
        assert!(matches!(decode("0 7"), Err(Error::MalformedRecord { .. })));
        assert!(matches!(decode(""), Err(Error::MalformedRecord { .. })));
    }

    #[test]
    fn test_negative_length() {
        assert!(matches!(decode("-2 1 -1"), Err(Error::MalformedRecord { .. })));
    }
}
