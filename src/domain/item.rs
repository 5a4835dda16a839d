//! Model names accepted for pulling.

use std::fmt;

use serde::Serialize;

/// A validated model name: non-empty, no whitespace anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Item(String);

impl Item {
    /// Validate a candidate name, returning `None` when it is rejected.
    pub fn parse(name: &str) -> Option<Self> {
        is_valid(name).then(|| Self(name.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Rejects empty strings and strings containing whitespace.
pub fn is_valid(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}
