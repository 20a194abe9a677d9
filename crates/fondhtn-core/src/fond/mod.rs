//! FOND post-processing of decoded domains

pub mod merger;
pub mod variant;

pub use merger::{FondMerger, VariantTable, merge_variants};
pub use variant::{VariantName, VariantNaming};
