//! Build-host integration.
//!
//! A host drives [`ContributorsPlugin`] through two roles: [`BeforeBuild`]
//! fills the indexed documentation keys, [`MetadataProvider`] returns the
//! record attached to package metadata. Both read the same cached lists.

use serde_json::{Map, Value};
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::ContributorsConfig;
use crate::errors::CoreError;
use crate::history::AuthorRecord;
use crate::metadata::contributor_metadata;
use crate::resolver::ContributorResolver;
use crate::stash::{populate_indexed, ConfigSink};
use crate::stopwords::{derive_stopwords, StopwordList};

/// Key prefix for contributor identities in the sink.
pub const CONTRIBUTORS_PREFIX: &str = "contributors";
/// Key prefix for stopwords in the sink.
pub const STOPWORDS_PREFIX: &str = "stopwords";

/// Runs before the host starts building.
#[allow(async_fn_in_trait)]
pub trait BeforeBuild {
    async fn before_build(&self, sink: &mut dyn ConfigSink) -> Result<(), CoreError>;
}

/// Supplies extra package metadata.
#[allow(async_fn_in_trait)]
pub trait MetadataProvider {
    async fn metadata(&self) -> Result<Map<String, Value>, CoreError>;
}

/// Contributor pipeline packaged for a build host.
#[derive(Debug)]
pub struct ContributorsPlugin {
    resolver: ContributorResolver,
    stopwords: OnceCell<StopwordList>,
}

impl ContributorsPlugin {
    pub fn new(config: &ContributorsConfig) -> Self {
        Self::from_resolver(ContributorResolver::new(config))
    }

    pub fn from_resolver(resolver: ContributorResolver) -> Self {
        Self {
            resolver,
            stopwords: OnceCell::new(),
        }
    }

    pub fn resolver(&self) -> &ContributorResolver {
        &self.resolver
    }

    pub async fn contributors(&self) -> Result<&[String], CoreError> {
        self.resolver.contributors().await
    }

    /// Contributors split back into name and email.
    pub async fn records(&self) -> Result<Vec<AuthorRecord>, CoreError> {
        let contributors = self.contributors().await?;
        Ok(contributors.iter().map(|c| AuthorRecord::parse(c)).collect())
    }

    pub async fn stopwords(&self) -> Result<&[String], CoreError> {
        self.stopwords
            .get_or_try_init(|| async move {
                let contributors = self.contributors().await?;
                Ok::<_, CoreError>(derive_stopwords(contributors))
            })
            .await
            .map(Vec::as_slice)
    }
}

impl BeforeBuild for ContributorsPlugin {
    async fn before_build(&self, sink: &mut dyn ConfigSink) -> Result<(), CoreError> {
        let contributors = self.contributors().await?;
        let stopwords = self.stopwords().await?;

        populate_indexed(&mut *sink, CONTRIBUTORS_PREFIX, contributors);
        populate_indexed(&mut *sink, STOPWORDS_PREFIX, stopwords);

        info!(
            contributors = contributors.len(),
            stopwords = stopwords.len(),
            "populated contributor keys"
        );
        Ok(())
    }
}

impl MetadataProvider for ContributorsPlugin {
    async fn metadata(&self) -> Result<Map<String, Value>, CoreError> {
        let contributors = self.contributors().await?;
        Ok(contributor_metadata(contributors))
    }
}
