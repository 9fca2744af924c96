//! Route matching logic.
//!
//! # Design Decisions
//! - Path matching is a literal, case-sensitive prefix comparison
//! - No normalization: trailing slashes, dot segments and percent-encoding
//!   are compared as received
//! - Only the path is inspected; the query string never participates

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `path` starts with the configured prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}
