//! Reading authorship out of git history.

pub mod reader;
pub mod record;

#[cfg(test)]
pub(crate) mod test_support;

pub use reader::{split_count, strip_count, HistoryReader, ShortlogLines};
pub use record::AuthorRecord;
