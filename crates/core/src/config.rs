//! TOML-based configuration for the contributor pipeline.
//!
//! Every section is optional; a missing file is only an error when the
//! caller asks for one explicitly via [`ContributorsConfig::load_from_file`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::ConfigError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributorsConfig {
    /// Project metadata, including the declared authors.
    #[serde(default)]
    pub project: ProjectConfig,

    /// How git history is read.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Where the canonical identity mapping comes from.
    #[serde(default)]
    pub canonical: CanonicalConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// Project settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Declared primary authors. Matched exactly against raw history
    /// identities and never reported as contributors.
    #[serde(default)]
    pub authors: Vec<String>,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Settings for invoking `git shortlog`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Name or path of the git executable (default `git`).
    #[serde(default = "default_git_binary")]
    pub git_binary: String,

    /// Repository working directory (default `.`).
    #[serde(default = "default_repo_path")]
    pub repo_path: PathBuf,

    /// History tip to summarize (default `HEAD`).
    #[serde(default = "default_revision")]
    pub revision: String,

    /// Upper bound on a single git invocation, in seconds (default 60).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_git_binary() -> String {
    "git".into()
}
fn default_repo_path() -> PathBuf {
    PathBuf::from(".")
}
fn default_revision() -> String {
    "HEAD".into()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            git_binary: default_git_binary(),
            repo_path: default_repo_path(),
            revision: default_revision(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HistoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// Canonical mapping
// ---------------------------------------------------------------------------

/// Canonical identity mapping settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanonicalConfig {
    /// Path to a TOML mapping file. When unset, the mapping bundled with the
    /// library is used.
    #[serde(default)]
    pub mapping_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum tracing level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

impl ContributorsConfig {
    /// Load a [`ContributorsConfig`] from a TOML file at the given path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: ContributorsConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        debug!(
            authors = config.project.authors.len(),
            "configuration parsed successfully"
        );
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate that all fields are sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.git_binary.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "history.git_binary".into(),
                detail: "git binary must not be empty".into(),
            });
        }
        if self.history.revision.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "history.revision".into(),
                detail: "revision must not be empty".into(),
            });
        }
        // Would otherwise be parsed by git as an option.
        if self.history.revision.starts_with('-') {
            return Err(ConfigError::InvalidValue {
                field: "history.revision".into(),
                detail: "revision must not start with '-'".into(),
            });
        }
        if self.history.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.timeout_secs".into(),
                detail: "timeout must be > 0".into(),
            });
        }

        Ok(())
    }

    /// Convenience: load (or default) and validate in one call.
    pub fn load_and_validate<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?;
        config.validate()?;
        Ok(config)
    }
}
