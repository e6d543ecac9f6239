// src/search/sink.rs
// =============================================================================
// Where results end up once the search is over.
//
// - ResultSink: receives the winning path, exactly once per successful run
// - FileSink: writes that path to a file
// - write_entries: dumps every visited page, one per line
// =============================================================================

use super::entry::Entry;
use crate::error::SearchError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn persist(&self, path: &str) -> Result<(), SearchError>;
}

/// Writes the path (plus a trailing newline) to a file, replacing it
#[derive(Debug, Clone)]
pub struct FileSink {
    file: PathBuf,
}

impl FileSink {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        FileSink { file: file.into() }
    }
}

#[async_trait]
impl ResultSink for FileSink {
    async fn persist(&self, path: &str) -> Result<(), SearchError> {
        tokio::fs::write(&self.file, format!("{}\n", path))
            .await
            .map_err(|e| SearchError::Persist(format!("{}: {}", self.file.display(), e)))
    }
}

// Writes one line per entry: depth, title and URL separated by tabs
pub async fn write_entries(file: &Path, entries: &[Entry]) -> Result<(), SearchError> {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("{}\t{}\t{}\n", entry.depth, entry.title, entry.url));
    }

    tokio::fs::write(file, out)
        .await
        .map_err(|e| SearchError::Persist(format!("{}: {}", file.display(), e)))
}
