//! Merging of compiled nondeterministic action variants
//!
//! Grounding a FOND problem requires splitting every nondeterministic action
//! into deterministic variants routed through synthetic abstract tasks and
//! methods. The merger undoes that: variants of one grounded action collapse
//! into a single action with one effect alternative per variant, and the
//! routing artifacts are pruned.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use tracing::{debug, info};

use super::variant::{ARGUMENT_OPEN, VariantName, VariantNaming};
use crate::domain::{Action, Domain};
use crate::error::{Error, Result};

/// Number of variants per nondeterministic base action
///
/// Derived once from the routing method names and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantTable {
    counts: BTreeMap<String, usize>,
}

impl VariantTable {
    /// Build the table from method names carrying the variant prefix
    ///
    /// Variant indices of a base must be exactly `0..count`.
    pub fn from_methods<'a>(
        method_names: impl IntoIterator<Item = &'a str>,
        naming: &VariantNaming,
    ) -> Result<Self> {
        let mut indices: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
        for name in method_names {
            if let Some(variant) = VariantName::parse(name, naming)? {
                indices
                    .entry(variant.base.to_string())
                    .or_default()
                    .insert(variant.index);
            }
        }

        let mut counts = BTreeMap::new();
        for (base, seen) in indices {
            let count = seen.len();
            if seen.iter().copied().ne(0..count) {
                return Err(Error::VariantCountMismatch {
                    base,
                    reason: format!("method variant indices {:?} are not 0..{}", seen, count),
                });
            }
            counts.insert(base, count);
        }

        Ok(Self { counts })
    }

    pub fn variant_count(&self, base: &str) -> Option<usize> {
        self.counts.get(base).copied()
    }

    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Check that a variant identifier is one the methods declared
    pub fn check(&self, variant: &VariantName<'_>) -> Result<usize> {
        match self.variant_count(variant.base) {
            Some(count) if variant.index < count => Ok(count),
            Some(count) => Err(Error::VariantCountMismatch {
                base: variant.base.to_string(),
                reason: format!(
                    "action variant {} exceeds the {} variants declared by methods",
                    variant.index, count
                ),
            }),
            None => Err(Error::VariantCountMismatch {
                base: variant.base.to_string(),
                reason: "action variant has no routing methods".to_string(),
            }),
        }
    }

    /// Whether an abstract task is a routing task of a known base
    fn is_routing_task(&self, name: &str) -> bool {
        match name.split_once(ARGUMENT_OPEN) {
            Some((head, _)) => self.counts.contains_key(head),
            None => false,
        }
    }
}

/// Variants gathered under one merged name
struct MergedAction {
    base: String,
    count: usize,
    indices: Vec<usize>,
    action: Action,
}

/// Merges variant actions back into nondeterministic actions
#[derive(Debug, Clone)]
pub struct FondMerger {
    table: VariantTable,
    naming: VariantNaming,
}

impl FondMerger {
    /// Precompute the variant table from the domain's method names
    pub fn for_domain(domain: &Domain, naming: &VariantNaming) -> Result<Self> {
        naming.validate()?;
        let table = VariantTable::from_methods(domain.methods.keys().map(String::as_str), naming)?;
        Ok(Self::new(table, naming.clone()))
    }

    pub fn new(table: VariantTable, naming: VariantNaming) -> Self {
        Self { table, naming }
    }

    pub fn table(&self) -> &VariantTable {
        &self.table
    }

    /// Produce the merged domain
    pub fn merge(&self, domain: Domain) -> Result<Domain> {
        let Domain {
            actions,
            methods,
            abstract_tasks,
            state_features,
            initial_state,
            initial_abstract_task,
        } = domain;

        let mut kept: IndexMap<String, Action> = IndexMap::with_capacity(actions.len());
        let mut merged: IndexMap<String, MergedAction> = IndexMap::new();
        let mut pruned_preconditions = 0usize;

        for (name, action) in actions {
            if self.naming.is_method_precondition(&name) {
                pruned_preconditions += 1;
                continue;
            }
            let Some(variant) = VariantName::parse(&name, &self.naming)? else {
                kept.insert(name, action);
                continue;
            };
            let count = self.table.check(&variant)?;
            let merged_name = variant.merged_name();

            match merged.get_mut(&merged_name) {
                Some(entry) => {
                    if entry.indices.contains(&variant.index) {
                        return Err(Error::VariantCountMismatch {
                            base: entry.base.clone(),
                            reason: format!(
                                "variant {} of '{}' appears twice",
                                variant.index, merged_name
                            ),
                        });
                    }
                    entry.indices.push(variant.index);
                    entry.action.effects.extend(action.effects);
                }
                None => {
                    debug!(variant = %name, merged = %merged_name, "Merging action variants");
                    merged.insert(
                        merged_name,
                        MergedAction {
                            base: variant.base.to_string(),
                            count,
                            indices: vec![variant.index],
                            action,
                        },
                    );
                }
            }
        }

        let merged_count = merged.len();
        for (name, entry) in merged {
            if entry.indices.len() != entry.count {
                return Err(Error::VariantCountMismatch {
                    base: entry.base,
                    reason: format!(
                        "'{}' has {} action variants but methods declare {}",
                        name,
                        entry.indices.len(),
                        entry.count
                    ),
                });
            }
            if kept.contains_key(&name) {
                return Err(Error::MergeConflict(name));
            }
            kept.insert(name, entry.action);
        }

        let abstract_before = abstract_tasks.len();
        let abstract_tasks: Vec<String> = abstract_tasks
            .into_iter()
            .filter(|task| !self.table.is_routing_task(task))
            .collect();

        let methods_before = methods.len();
        let methods: IndexMap<String, _> = methods
            .into_iter()
            .filter(|(name, _)| !self.naming.is_variant(name))
            .collect();

        info!(
            bases = self.table.len(),
            merged_actions = merged_count,
            pruned_tasks = abstract_before - abstract_tasks.len(),
            pruned_methods = methods_before - methods.len(),
            pruned_preconditions,
            "Merged nondeterministic action variants"
        );

        Ok(Domain {
            actions: kept,
            methods,
            abstract_tasks,
            state_features,
            initial_state,
            initial_abstract_task,
        })
    }
}

/// Merge variant actions of a decoded domain
pub fn merge_variants(domain: Domain, naming: &VariantNaming) -> Result<Domain> {
    FondMerger::for_domain(&domain, naming)?.merge(domain)
}
