//! Error types for the contributor extraction library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them for callers that want a single
//! error type.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Canonical(#[from] CanonicalError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// History errors
// ---------------------------------------------------------------------------

/// Errors from reading authorship out of git history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The `git` binary was not found on `$PATH`.
    #[error("git binary not found: {0}")]
    BinaryNotFound(String),

    /// A shortlog line was not valid UTF-8.
    #[error("shortlog line {line} is not valid UTF-8: {source}")]
    Decode {
        line: usize,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A `git` command exited with a non-zero status.
    #[error("git command failed (exit {exit_code}): {stderr}")]
    CommandFailed {
        exit_code: i32,
        stderr: String,
    },

    /// The `git` command did not finish within the configured timeout.
    #[error("git command timed out after {0}s")]
    Timeout(u64),

    /// Generic I/O wrapper.
    #[error("git I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HistoryError {
    /// Whether this error means git itself is missing, in which case the
    /// pipeline no-ops instead of failing.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, HistoryError::BinaryNotFound(_))
    }
}

// ---------------------------------------------------------------------------
// Canonical mapping errors
// ---------------------------------------------------------------------------

/// Errors from loading the canonical identity mapping.
#[derive(Debug, Error)]
pub enum CanonicalError {
    /// The mapping file could not be loaded.
    #[error("canonical mapping file error at '{path}': {detail}")]
    MappingFileError {
        path: String,
        detail: String,
    },

    /// TOML parse error when reading the mapping.
    #[error("canonical mapping parse error: {0}")]
    ParseError(String),

    /// One alias is listed under two different canonical identities.
    #[error("alias '{alias}' maps to both '{first}' and '{second}'")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },

    /// Generic I/O error.
    #[error("canonical mapping I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue {
        field: String,
        detail: String,
    },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = HistoryError::CommandFailed {
            exit_code: 128,
            stderr: "fatal: not a git repository".into(),
        };
        assert_eq!(
            err.to_string(),
            "git command failed (exit 128): fatal: not a git repository"
        );

        let err = HistoryError::Timeout(60);
        assert_eq!(err.to_string(), "git command timed out after 60s");

        let err = CanonicalError::ConflictingAlias {
            alias: "ada <ada@alt.com>".into(),
            first: "Ada Lovelace <ada@example.com>".into(),
            second: "Ada Byron <byron@example.com>".into(),
        };
        assert!(err.to_string().contains("ada <ada@alt.com>"));

        let err = ConfigError::InvalidValue {
            field: "history.timeout_secs".into(),
            detail: "must be > 0".into(),
        };
        assert!(err.to_string().contains("history.timeout_secs"));
    }

    #[test]
    fn test_decode_error_keeps_line_number() {
        let source = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err = HistoryError::Decode { line: 3, source };
        assert!(err.to_string().starts_with("shortlog line 3 is not valid UTF-8"));
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_core_error_from_subsystem() {
        let history_err = HistoryError::BinaryNotFound("git".into());
        assert!(history_err.is_unavailable());
        let core_err: CoreError = history_err.into();
        assert!(matches!(core_err, CoreError::History(_)));

        let canonical_err = CanonicalError::ParseError("bad".into());
        let core_err: CoreError = canonical_err.into();
        assert!(matches!(core_err, CoreError::Canonical(_)));
    }
}
