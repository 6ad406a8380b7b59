//! git-contributors core library.
//!
//! Extracts the contributors of a repository from `git shortlog`, collapses
//! author aliases onto canonical identities, drops the project's declared
//! authors, and exposes the result as indexed documentation keys, name
//! stopwords, and package metadata.

pub mod canonical;
pub mod config;
pub mod errors;
pub mod history;
pub mod metadata;
pub mod plugin;
pub mod resolver;
pub mod stash;
pub mod stopwords;

// Re-exports for convenience.
pub use canonical::IdentityCanonicalizer;
pub use config::ContributorsConfig;
pub use history::HistoryReader;
pub use plugin::{BeforeBuild, ContributorsPlugin, MetadataProvider};
pub use resolver::{ContributorList, ContributorResolver};
pub use stash::{ConfigSink, IndexedStash};
pub use stopwords::StopwordList;
