//! Variant naming for compiled nondeterministic actions
//!
//! A nondeterministic action `pick` with N outcomes is compiled into
//! deterministic variants `fond_act__pick0` .. `fond_act__pick{N-1}`. Grounded
//! names add an argument suffix: `fond_act__pick1[x]`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opening bracket of a grounded argument suffix
pub const ARGUMENT_OPEN: char = '[';

/// Reserved prefixes used by the nondeterminism compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantNaming {
    /// Prefix of variant actions and their routing methods
    pub variant_prefix: String,
    /// Prefix of the synthetic method-precondition actions
    pub method_precondition_prefix: String,
}

impl Default for VariantNaming {
    fn default() -> Self {
        Self {
            variant_prefix: "fond_act__".to_string(),
            method_precondition_prefix: "__method_precondition_fond_act__".to_string(),
        }
    }
}

impl VariantNaming {
    pub fn validate(&self) -> Result<()> {
        for (key, prefix) in [
            ("naming.variant_prefix", &self.variant_prefix),
            (
                "naming.method_precondition_prefix",
                &self.method_precondition_prefix,
            ),
        ] {
            if prefix.is_empty() {
                return Err(Error::Config(format!("{} must not be empty", key)));
            }
            if prefix.contains(ARGUMENT_OPEN) {
                return Err(Error::Config(format!(
                    "{} must not contain '{}'",
                    key, ARGUMENT_OPEN
                )));
            }
        }
        Ok(())
    }

    pub fn is_variant(&self, name: &str) -> bool {
        name.starts_with(&self.variant_prefix)
    }

    pub fn is_method_precondition(&self, name: &str) -> bool {
        name.starts_with(&self.method_precondition_prefix)
    }
}

/// A parsed variant identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantName<'a> {
    /// Name of the original nondeterministic action
    pub base: &'a str,
    /// Outcome index encoded in the trailing digits
    pub index: usize,
    /// Grounded argument suffix after `[`, when present
    pub arguments: Option<&'a str>,
}

impl<'a> VariantName<'a> {
    /// Parse a name carrying the variant prefix
    ///
    /// Returns `Ok(None)` for names without the prefix. A prefixed name
    /// without a base or a numeric index is an error: it cannot be routed
    /// back to any action.
    pub fn parse(name: &'a str, naming: &VariantNaming) -> Result<Option<Self>> {
        let Some(rest) = name.strip_prefix(naming.variant_prefix.as_str()) else {
            return Ok(None);
        };
        let (bare, arguments) = match rest.split_once(ARGUMENT_OPEN) {
            Some((bare, arguments)) => (bare, Some(arguments)),
            None => (rest, None),
        };

        let base = bare.trim_end_matches(|c: char| c.is_ascii_digit());
        let digits = &bare[base.len()..];
        if base.is_empty() || digits.is_empty() {
            return Err(Error::VariantCountMismatch {
                base: name.to_string(),
                reason: "name carries the variant prefix but no '<base><index>' part".to_string(),
            });
        }
        let index = digits.parse::<usize>().map_err(|_| Error::VariantCountMismatch {
            base: base.to_string(),
            reason: format!("variant index '{}' does not fit in usize", digits),
        })?;

        Ok(Some(Self {
            base,
            index,
            arguments,
        }))
    }

    /// Name of the merged action: base plus the argument suffix
    pub fn merged_name(&self) -> String {
        match self.arguments {
            Some(arguments) => format!("{}{}{}", self.base, ARGUMENT_OPEN, arguments),
            None => self.base.to_string(),
        }
    }
}
