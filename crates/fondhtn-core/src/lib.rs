//! fondhtn Core Library
//!
//! This crate provides the core functionality for fondhtn, including:
//! - Decoding of grounded HTN output into a planning domain
//! - Merging of compiled nondeterministic action variants (FOND)
//! - Domain JSON output for the downstream planner
//! - Configuration

pub mod config;
pub mod domain;
pub mod error;
pub mod fond;
pub mod grounded;
pub mod output;

pub use domain::{Action, ConditionalEffect, Domain, DomainSummary, EffectAlternative, Method};
pub use error::{Error, Result};

use tracing::info;

use crate::config::Config;

/// Convert grounded text into the domain handed to the planner
///
/// Decodes the text and, unless disabled in the configuration, merges the
/// nondeterministic action variants. Any fault aborts the conversion.
pub fn convert(text: &str, config: &Config) -> Result<Domain> {
    let domain = grounded::decode(text)?;
    if !config.merge.enabled {
        info!("FOND merging disabled, keeping action variants");
        return Ok(domain);
    }
    fond::merge_variants(domain, &config.naming)
}
