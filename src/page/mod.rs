// src/page/mod.rs
// =============================================================================
// This module turns a URL into something the search can use: the page's title
// and the wiki links on it.
//
// The search only talks to these two traits, so tests can swap in an
// in-memory site instead of the network.
//
// Submodules:
// - fetch: Downloads a page over HTTP
// - extract: Pulls the title and the links out of the HTML
// =============================================================================

mod extract;
mod fetch;

pub use extract::HtmlExtractor;
pub use fetch::HttpFetcher;

use crate::error::SearchError;
use async_trait::async_trait;

/// What the search needs to know about one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub title: String,
    /// Raw hrefs (e.g. "/wiki/Rust"), still relative to the site
    pub links: Vec<String>,
}

/// Downloads the raw content of a page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, SearchError>;
}

/// Reads the title and the same-site links from raw page content
pub trait LinkExtractor: Send + Sync {
    fn extract_links_and_title(&self, content: &str) -> Result<PageSummary, SearchError>;
}
