//! Grounded HTN output decoding
//!
//! Turns the index-based text written by the grounder into a [`Domain`].
//! Stages run in a fixed order because each one consumes what the previous
//! ones produced:
//!
//! - [`Sections::split`] - raw text into named sections
//! - [`TaskTable::from_sections`] - primitive/abstract split and the id space
//! - [`decode_actions`] - one action per primitive task
//! - [`decode_methods`] - methods over the continuous id space
//! - [`resolve_init`] - initial facts and the root abstract task

pub mod actions;
pub mod effects;
pub mod init;
pub mod methods;
pub mod sections;
pub mod tasks;
pub mod tokens;

pub use actions::{ACTION_STRIDE, decode_actions};
pub use effects::{EffectBlocks, decode_effect_blocks};
pub use init::{InitialState, resolve_init};
pub use methods::{METHOD_STRIDE, decode_methods};
pub use sections::{Section, Sections, normalize_header};
pub use tasks::{TaskId, TaskTable};
pub use tokens::{FeatureTable, Record, SENTINEL};

use tracing::info;

use crate::domain::Domain;
use crate::error::Result;

/// Decode grounded text into a domain
pub fn decode(text: &str) -> Result<Domain> {
    let sections = Sections::split(text);
    let features = FeatureTable::new(sections.get(sections::STATE_FEATURES)?);

    let tasks = TaskTable::from_sections(&sections)?;
    let actions = decode_actions(&sections, &features, &tasks)?;
    let methods = decode_methods(&sections, &tasks)?;
    let init = resolve_init(&sections, &features, &tasks, &actions)?;

    info!(
        features = features.len(),
        primitive_tasks = tasks.primitive_count(),
        abstract_tasks = tasks.abstract_count(),
        actions = actions.len(),
        methods = methods.len(),
        "Decoded grounded domain"
    );

    Ok(Domain {
        actions,
        methods,
        abstract_tasks: tasks.abstract_tasks().to_vec(),
        state_features: features.to_vec(),
        initial_state: init.facts,
        initial_abstract_task: init.root_task,
    })
}
