//! Contributor resolution.
//!
//! [`resolve_contributors`] turns raw shortlog lines into the ordered,
//! deduplicated contributor list. [`ContributorResolver`] wires it to a real
//! [`HistoryReader`] and caches the canonical mapping and the resulting list
//! so git is invoked at most once per resolver.

use std::collections::HashSet;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::canonical::{IdentityCanonicalizer, MappingSource};
use crate::config::ContributorsConfig;
use crate::errors::{CanonicalError, CoreError, HistoryError};
use crate::history::{strip_count, HistoryReader};

/// Identity git records when `user.name` / `user.email` were never set.
pub const PLACEHOLDER_IDENTITY: &str = "Your Name <you@example.com>";

/// Ordered, unique contributor identity strings in first-seen order.
pub type ContributorList = Vec<String>;

/// Resolve raw shortlog lines into a [`ContributorList`].
///
/// Declared authors are matched against the raw identity before
/// canonicalization. They and the placeholder identity also seed the dedup
/// set, so an alias that canonicalizes onto a declared author is dropped too.
pub fn resolve_contributors<I>(
    lines: I,
    exclusions: &[String],
    canonicalizer: &IdentityCanonicalizer,
) -> Result<ContributorList, HistoryError>
where
    I: IntoIterator<Item = Result<String, HistoryError>>,
{
    let mut seen: HashSet<String> = exclusions.iter().cloned().collect();
    seen.insert(PLACEHOLDER_IDENTITY.to_string());

    let mut contributors = Vec::new();
    for line in lines {
        let line = line?;
        let candidate = strip_count(&line);

        if exclusions.iter().any(|author| author == candidate) {
            debug!(identity = candidate, "skipping declared author");
            continue;
        }
        if candidate == PLACEHOLDER_IDENTITY {
            debug!("skipping unconfigured placeholder identity");
            continue;
        }

        let canonical = canonicalizer.lookup(candidate);
        if canonical != candidate {
            debug!(alias = candidate, canonical, "canonicalized identity");
        }
        if seen.insert(canonical.to_string()) {
            contributors.push(canonical.to_string());
        }
    }

    Ok(contributors)
}

/// Lazily computes and caches the contributor list for one repository.
#[derive(Debug)]
pub struct ContributorResolver {
    reader: HistoryReader,
    exclusions: Vec<String>,
    mapping_source: MappingSource,
    canonicalizer: OnceCell<IdentityCanonicalizer>,
    contributors: OnceCell<ContributorList>,
}

impl ContributorResolver {
    pub fn new(config: &ContributorsConfig) -> Self {
        Self::with_parts(
            HistoryReader::new(&config.history),
            config.project.authors.clone(),
            MappingSource::from_config(&config.canonical),
        )
    }

    pub fn with_parts(
        reader: HistoryReader,
        exclusions: Vec<String>,
        mapping_source: MappingSource,
    ) -> Self {
        Self {
            reader,
            exclusions,
            mapping_source,
            canonicalizer: OnceCell::new(),
            contributors: OnceCell::new(),
        }
    }

    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    pub fn reader(&self) -> &HistoryReader {
        &self.reader
    }

    /// The canonical mapping, loaded on first use.
    pub async fn canonicalizer(&self) -> Result<&IdentityCanonicalizer, CanonicalError> {
        self.canonicalizer
            .get_or_try_init(|| async move { IdentityCanonicalizer::load(&self.mapping_source) })
            .await
    }

    /// The contributor list, computed on first call and cached afterwards.
    ///
    /// When git is not installed the list is empty and nothing else runs.
    pub async fn contributors(&self) -> Result<&[String], CoreError> {
        self.contributors
            .get_or_try_init(|| self.compute())
            .await
            .map(Vec::as_slice)
    }

    async fn compute(&self) -> Result<ContributorList, CoreError> {
        if !self.reader.is_available().await {
            warn!("git not available, skipping contributor extraction");
            return Ok(Vec::new());
        }

        let lines = match self.reader.read_lines().await {
            Ok(lines) => lines,
            Err(e) if e.is_unavailable() => {
                warn!(error = %e, "git disappeared, skipping contributor extraction");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let canonicalizer = self.canonicalizer().await?;
        let contributors = resolve_contributors(lines, &self.exclusions, canonicalizer)?;
        info!(
            count = contributors.len(),
            revision = self.reader.revision(),
            "resolved contributors"
        );
        Ok(contributors)
    }
}
