//! A single author identity as it appears in git history.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An author identity, `Name <email>` or a bare `Name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AuthorRecord {
    /// Display name.
    pub name: String,
    /// Email address, absent for malformed lines.
    pub email: Option<String>,
}

impl AuthorRecord {
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            name: name.into(),
            email,
        }
    }

    /// Split an identity string at its first ` <`.
    ///
    /// The email is only recognised when the remainder closes with `>`;
    /// otherwise the whole string is taken as the name.
    pub fn parse(identity: &str) -> Self {
        if let Some((name, rest)) = identity.split_once(" <") {
            if let Some(email) = rest.strip_suffix('>') {
                return Self::new(name, Some(email.to_string()));
            }
        }
        Self::new(identity, None)
    }

    /// The identity string used for comparison and output.
    pub fn identity(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AuthorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{}>", self.name, email),
            None => f.write_str(&self.name),
        }
    }
}
