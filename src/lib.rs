// src/lib.rs
// =============================================================================
// link-trail: find a chain of links from one wiki page to another.
//
// Modules:
// - search: The concurrent search (entries, visited set, termination signal,
//   task pool, engine)
// - page: Fetching pages and reading their title and links
// - error: The error type shared by both
// - logging: tracing setup for the binary
// =============================================================================

pub mod error;
pub mod logging;
pub mod page;
pub mod search;

pub use error::SearchError;
