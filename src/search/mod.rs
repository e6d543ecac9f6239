// src/search/mod.rs
// =============================================================================
// This module is the concurrent search: everything between "here is a start
// page" and "here is the path to the target".
//
// Submodules:
// - entry: Visited pages and the parent links between them
// - visited: Which URLs have been claimed by a task
// - signal: The shared "are we done?" flag
// - pool: Runs tasks with a fixed number of workers
// - engine: The search itself
// - config: Run settings
// - sink: Where the result gets written
// =============================================================================

mod config;
mod engine;
mod entry;
mod pool;
mod signal;
mod sink;
mod visited;

pub use config::SearchConfig;
pub use engine::{SearchEngine, SearchOutcome, SearchReport};
pub use entry::{Entry, EntryArena, EntryId, ParentRef};
pub use pool::{Task, TaskPool};
pub use signal::{SignalState, TerminationSignal, Winner};
pub use sink::{write_entries, FileSink, ResultSink};
pub use visited::VisitedSet;
