//! Contributor list formatted for build/package metadata.

use serde_json::{Map, Value};

/// Metadata key carrying the contributor list.
pub const CONTRIBUTORS_KEY: &str = "x_contributors";

/// `{"x_contributors": [...]}`, or an empty record when there are no
/// contributors. Identity strings are passed through untouched.
pub fn contributor_metadata<S: AsRef<str>>(contributors: &[S]) -> Map<String, Value> {
    let mut record = Map::new();
    if !contributors.is_empty() {
        let list = contributors
            .iter()
            .map(|c| Value::String(c.as_ref().to_string()))
            .collect();
        record.insert(CONTRIBUTORS_KEY.to_string(), Value::Array(list));
    }
    record
}
