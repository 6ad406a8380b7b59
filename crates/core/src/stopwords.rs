//! Name tokens derived from contributor identities, fed to documentation
//! tooling as spelling stopwords.

use std::collections::HashSet;

/// Ordered, unique name tokens in first-seen order.
pub type StopwordList = Vec<String>;

/// The name part of an identity: everything before the first ` <`, or the
/// whole string when there is no bracketed email.
pub fn name_portion(identity: &str) -> &str {
    match identity.split_once(" <") {
        Some((name, _)) => name,
        None => identity,
    }
}

/// Split each contributor's name on single spaces and deduplicate the
/// tokens, keeping the first occurrence.
pub fn derive_stopwords<S: AsRef<str>>(contributors: &[S]) -> StopwordList {
    let mut seen = HashSet::new();
    contributors
        .iter()
        .flat_map(|identity| name_portion(identity.as_ref()).split(' '))
        .filter(|token| !token.is_empty())
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}
