//! TOML-based canonical mapping file reader.
//!
//! The mapping file format:
//!
//! ```toml
//! [canonical]
//! "Ada Lovelace <ada@example.com>" = [
//!     "ada.l@alt.com <ada.l@alt.com>",
//!     "ada <ada@old-host.example>",
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::CanonicalError;

/// Canonical identity -> ordered alias identities.
pub type CanonicalEntries = BTreeMap<String, Vec<String>>;

/// Wrapper around the TOML mapping file structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MappingFileData {
    /// The `[canonical]` table.
    #[serde(default)]
    pub canonical: CanonicalEntries,
}

/// Utilities for loading the canonical mapping file.
pub struct MappingFile;

impl MappingFile {
    /// Load the mapping file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<CanonicalEntries, CanonicalError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading canonical mapping file");

        if !path.exists() {
            return Err(CanonicalError::MappingFileError {
                path: path.display().to_string(),
                detail: "file not found".into(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(CanonicalError::IoError)?;
        Self::parse(&contents)
    }

    /// Parse mapping file contents.
    pub fn parse(contents: &str) -> Result<CanonicalEntries, CanonicalError> {
        let data: MappingFileData =
            toml::from_str(contents).map_err(|e| CanonicalError::ParseError(e.to_string()))?;

        debug!(count = data.canonical.len(), "loaded canonical identities");
        Ok(data.canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_mapping_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canonical.toml");

        let content = r#"
[canonical]
"Ada Lovelace <ada@example.com>" = ["ada.l@alt.com <ada.l@alt.com>", "ada <ada@old.example>"]
"Alan Turing <alan@example.com>" = ["aturing <aturing@example.org>"]
"#;
        std::fs::write(&path, content).unwrap();

        let entries = MappingFile::load(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries["Ada Lovelace <ada@example.com>"],
            vec!["ada.l@alt.com <ada.l@alt.com>", "ada <ada@old.example>"]
        );
    }

    #[test]
    fn test_load_nonexistent() {
        let result = MappingFile::load("/nonexistent/canonical.toml");
        assert!(matches!(
            result,
            Err(CanonicalError::MappingFileError { .. })
        ));
    }

    #[test]
    fn test_parse_malformed() {
        let result = MappingFile::parse(r#"[canonical]
"Ada <ada@example.com>" = "not a list"
"#);
        assert!(matches!(result, Err(CanonicalError::ParseError(_))));
    }

    #[test]
    fn test_parse_empty() {
        assert!(MappingFile::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_bundled_mapping_parses() {
        let bundled = include_str!("../../data/canonical.toml");
        assert!(MappingFile::parse(bundled).is_ok());
    }
}
