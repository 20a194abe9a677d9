//! Action record decoding
//!
//! The actions section is a flat stream of 4-line records, one per
//! primitive task and in primitive task order:
//!
//! 1. cost
//! 2. `-1` terminated precondition feature ids
//! 3. add effect blocks
//! 4. delete effect blocks

use indexmap::IndexMap;
use tracing::debug;

use super::effects::decode_effect_blocks;
use super::sections::{ACTIONS, Sections};
use super::tasks::TaskTable;
use super::tokens::{FeatureTable, Record};
use crate::domain::{Action, EffectAlternative};
use crate::error::{Error, Result};

/// Lines per action record
pub const ACTION_STRIDE: usize = 4;

/// Decode every action record, naming each after its primitive task
pub fn decode_actions(
    sections: &Sections<'_>,
    features: &FeatureTable<'_>,
    tasks: &TaskTable,
) -> Result<IndexMap<String, Action>> {
    let lines = sections.get(ACTIONS)?;

    if lines.len() % ACTION_STRIDE != 0 {
        return Err(Error::malformed(
            ACTIONS,
            lines.len() / ACTION_STRIDE,
            format!(
                "{} lines do not divide into {}-line records",
                lines.len(),
                ACTION_STRIDE
            ),
        ));
    }

    let records = lines.len() / ACTION_STRIDE;
    if records != tasks.primitive_count() {
        return Err(Error::malformed(
            ACTIONS,
            records.min(tasks.primitive_count()),
            format!(
                "found {} action records for {} primitive tasks",
                records,
                tasks.primitive_count()
            ),
        ));
    }

    let mut actions = IndexMap::with_capacity(records);
    for (index, (record, name)) in lines
        .chunks_exact(ACTION_STRIDE)
        .zip(tasks.primitive())
        .enumerate()
    {
        let at = Record::new(ACTIONS, index);
        let action = decode_action(record, features, &at)?;
        if actions.insert(name.clone(), action).is_some() {
            return Err(at.malformed(format!("duplicate action name '{}'", name)));
        }
    }

    debug!(count = actions.len(), "Decoded actions");
    Ok(actions)
}

fn decode_action(record: &[&str], features: &FeatureTable<'_>, at: &Record<'_>) -> Result<Action> {
    let cost = at.single_int(record[0])?;
    let cost = u64::try_from(cost)
        .map_err(|_| at.malformed(format!("cost must be non-negative, found {}", cost)))?;

    let precond = features.names(&at.id_list(record[1])?, at)?;
    let add = decode_effect_blocks(record[2], features, at)?;
    let del = decode_effect_blocks(record[3], features, at)?;

    Ok(Action::deterministic(
        cost,
        precond,
        EffectAlternative {
            add_eff: add.unconditional,
            del_eff: del.unconditional,
            cond_add_eff: add.conditional,
            cond_del_eff: del.conditional,
        },
    ))
}
