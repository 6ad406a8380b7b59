//! Canonical identity mapping: collapsing author aliases onto one preferred
//! identity string.
//!
//! The mapping is an explicit, exact-key lookup table loaded from a TOML
//! resource. There is no fuzzy matching.

pub mod canonicalizer;
pub mod mapping_file;

pub use canonicalizer::{IdentityCanonicalizer, MappingSource};
pub use mapping_file::MappingFile;
