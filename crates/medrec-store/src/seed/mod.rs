//! Seed import
//!
//! Provides:
//! - Seed Format v0 schema
//! - YAML parser with validation
//! - Digest canonicalization
//! - Importer that resets the tables and loads a seed in one transaction
//! - The built-in default seed

pub mod digest;
pub mod format_v0;
pub mod importer;
pub mod parser;

pub use digest::compute_seed_digest;
pub use format_v0::SeedV0;
pub use importer::{import_seed, import_seed_file, SeedSummary};
pub use parser::{parse_seed_file, parse_seed_str};

/// Seed loaded by `medrec seed` when no path is given
pub const DEFAULT_SEED: &str = include_str!("default_seed.yaml");

/// Parse the built-in default seed
///
/// # Errors
///
/// Only if the embedded YAML is broken, which the tests guard against.
pub fn default_seed() -> crate::errors::Result<SeedV0> {
    parse_seed_str(DEFAULT_SEED)
}
