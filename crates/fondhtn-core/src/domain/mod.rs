//! Normalized planning domain
//!
//! The structured value handed to the downstream planner. Field names and
//! shapes are part of the planner's input contract, so the serde attributes
//! here are load-bearing.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An effect that only fires when every condition feature holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalEffect {
    pub condition: Vec<String>,
    pub effect: String,
}

/// One possible outcome of an action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectAlternative {
    pub add_eff: Vec<String>,
    pub del_eff: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cond_add_eff: Vec<ConditionalEffect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cond_del_eff: Vec<ConditionalEffect>,
}

impl EffectAlternative {
    /// Create an outcome with unconditional effects only
    pub fn new(add_eff: Vec<String>, del_eff: Vec<String>) -> Self {
        Self {
            add_eff,
            del_eff,
            ..Self::default()
        }
    }

    /// Whether the outcome carries any conditional effect
    pub fn has_conditional(&self) -> bool {
        !self.cond_add_eff.is_empty() || !self.cond_del_eff.is_empty()
    }
}

/// A primitive, directly executable task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub cost: u64,
    pub precond: Vec<String>,
    /// Outcome alternatives in canonical order. Deterministic actions have one.
    pub effects: Vec<EffectAlternative>,
}

impl Action {
    /// Create a deterministic action with a single outcome
    pub fn deterministic(cost: u64, precond: Vec<String>, outcome: EffectAlternative) -> Self {
        Self {
            cost,
            precond,
            effects: vec![outcome],
        }
    }

    pub fn is_nondeterministic(&self) -> bool {
        self.effects.len() > 1
    }
}

/// A decomposition of an abstract task into subtasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Name of the abstract task this method refines
    pub task: String,
    /// Subtask names, primitive or abstract
    pub subtasks: Vec<String>,
    /// `(before, after)` pairs over positions in `subtasks`
    pub orderings: Vec<(usize, usize)>,
}

/// The decoded planning domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub actions: IndexMap<String, Action>,
    pub methods: IndexMap<String, Method>,
    /// Abstract task names
    #[serde(rename = "tasks")]
    pub abstract_tasks: Vec<String>,
    pub state_features: Vec<String>,
    pub initial_state: Vec<String>,
    pub initial_abstract_task: String,
}

impl Domain {
    pub fn summary(&self) -> DomainSummary {
        DomainSummary {
            state_features: self.state_features.len(),
            actions: self.actions.len(),
            nondeterministic_actions: self
                .actions
                .values()
                .filter(|a| a.is_nondeterministic())
                .count(),
            methods: self.methods.len(),
            abstract_tasks: self.abstract_tasks.len(),
            initial_facts: self.initial_state.len(),
            initial_abstract_task: self.initial_abstract_task.clone(),
        }
    }
}

/// Size overview of a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub state_features: usize,
    pub actions: usize,
    pub nondeterministic_actions: usize,
    pub methods: usize,
    pub abstract_tasks: usize,
    pub initial_facts: usize,
    pub initial_abstract_task: String,
}

impl fmt::Display for DomainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "State features:        {}", self.state_features)?;
        writeln!(
            f,
            "Actions:               {} ({} nondeterministic)",
            self.actions, self.nondeterministic_actions
        )?;
        writeln!(f, "Methods:               {}", self.methods)?;
        writeln!(f, "Abstract tasks:        {}", self.abstract_tasks)?;
        writeln!(f, "Initial facts:         {}", self.initial_facts)?;
        write!(f, "Initial abstract task: {}", self.initial_abstract_task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_effects_serialize_without_conditional_fields() {
        let action = Action::deterministic(
            1,
            vec!["p".to_string()],
            EffectAlternative::new(vec!["q".to_string()], vec![]),
        );
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "cost": 1,
                "precond": ["p"],
                "effects": [{"add_eff": ["q"], "del_eff": []}]
            })
        );
    }

    #[test]
    fn test_domain_uses_tasks_key_for_abstract_tasks() {
        let domain = Domain {
            actions: IndexMap::new(),
            methods: IndexMap::new(),
            abstract_tasks: vec!["root[]".to_string()],
            state_features: vec![],
            initial_state: vec![],
            initial_abstract_task: "root[]".to_string(),
        };
        let json = serde_json::to_value(&domain).unwrap();
        assert_eq!(json["tasks"], serde_json::json!(["root[]"]));
        assert_eq!(domain.summary().abstract_tasks, 1);
    }
}
