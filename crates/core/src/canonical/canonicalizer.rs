//! Alias -> canonical identity lookup.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, info};

use super::mapping_file::{CanonicalEntries, MappingFile};
use crate::config::CanonicalConfig;
use crate::errors::CanonicalError;

/// Mapping shipped with the library, used when no file is configured.
const BUNDLED_MAPPING: &str = include_str!("../../data/canonical.toml");

/// Where the canonical mapping is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingSource {
    /// The mapping bundled with this crate.
    ///
    /// The bundled table is intentionally empty: aliases are project
    /// specific, so with no `canonical.mapping_file` every identity passes
    /// through unchanged.
    Bundled,
    /// An explicit file on disk. Missing or malformed files are fatal.
    File(PathBuf),
}

impl MappingSource {
    pub fn from_config(config: &CanonicalConfig) -> Self {
        match &config.mapping_file {
            Some(path) => MappingSource::File(path.clone()),
            None => MappingSource::Bundled,
        }
    }
}

/// Exact-key lookup from alias identities to their canonical identity.
#[derive(Debug, Clone, Default)]
pub struct IdentityCanonicalizer {
    /// alias -> canonical
    aliases: HashMap<String, String>,
}

impl IdentityCanonicalizer {
    /// Read and invert the mapping from `source`.
    pub fn load(source: &MappingSource) -> Result<Self, CanonicalError> {
        let entries = match source {
            MappingSource::Bundled => {
                debug!("using bundled canonical mapping");
                MappingFile::parse(BUNDLED_MAPPING)?
            }
            MappingSource::File(path) => MappingFile::load(path)?,
        };
        Self::from_entries(&entries)
    }

    /// Invert canonical -> aliases into alias -> canonical.
    ///
    /// An alias listed under two different canonical identities is an error.
    /// Listing the same alias twice under one canonical identity is not.
    pub fn from_entries(entries: &CanonicalEntries) -> Result<Self, CanonicalError> {
        let mut aliases: HashMap<String, String> = HashMap::new();
        for (canonical, alternates) in entries {
            for alias in alternates {
                match aliases.get(alias) {
                    Some(existing) if existing != canonical => {
                        return Err(CanonicalError::ConflictingAlias {
                            alias: alias.clone(),
                            first: existing.clone(),
                            second: canonical.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        aliases.insert(alias.clone(), canonical.clone());
                    }
                }
            }
        }

        info!(
            canonical = entries.len(),
            aliases = aliases.len(),
            "canonical mapping ready"
        );
        Ok(Self { aliases })
    }

    /// The canonical form of `identity`, or `identity` itself when it is not
    /// a known alias.
    pub fn lookup<'a>(&'a self, identity: &'a str) -> &'a str {
        self.aliases
            .get(identity)
            .map(String::as_str)
            .unwrap_or(identity)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
