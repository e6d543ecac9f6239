// src/error.rs
// =============================================================================
// Error types for the search.
//
// Most of these are "branch-local": a page that fails to download or parse
// only stops the part of the search below that page. The engine logs them and
// carries on. Only Config errors stop a run, and they happen before it starts.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Network failure, timeout or non-success HTTP status
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The page didn't have the shape we expected (no title, no content area)
    #[error("failed to parse page: {0}")]
    Parse(String),

    /// A link couldn't be turned into an absolute URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Bad run configuration, reported before any page is fetched
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Writing the result somewhere failed
    #[error("failed to persist result: {0}")]
    Persist(String),
}

impl SearchError {
    // True for errors that only end the branch that produced them
    pub fn is_branch_local(&self) -> bool {
        matches!(
            self,
            SearchError::Fetch { .. } | SearchError::Parse(_) | SearchError::InvalidUrl { .. }
        )
    }
}
