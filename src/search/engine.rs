// src/search/engine.rs
// =============================================================================
// The search engine: walks the link graph from the start page until it finds
// a page with the target title, using many tasks at once.
//
// How it works:
// 1. The start URL is submitted to the task pool as the first task
// 2. Every task handles one URL, in this order, giving up at the first "no":
//    a. Is the search already over?            -> stop
//    b. Is the parent already at max depth?    -> stop
//    c. Can we claim the URL in the visited set? (no = someone else has it)
//    d. Fetch the page, then read its title and links
//       (a failure here only ends this branch)
//    e. Title matches the target?  -> record the winner, shut everything down
//    f. Otherwise store an entry and submit one task per new link
// 3. run() waits until either the goal is found or the pool runs dry
//
// There is no central queue: the "frontier" is simply the set of tasks that
// are queued or running in the pool.
// =============================================================================

use super::config::SearchConfig;
use super::entry::{Entry, EntryArena, ParentRef};
use super::pool::{Task, TaskPool};
use super::signal::{SignalState, TerminationSignal, Winner};
use super::sink::ResultSink;
use super::visited::VisitedSet;
use crate::error::SearchError;
use crate::page::{LinkExtractor, PageFetcher, PageSummary};
use futures::FutureExt;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A page with the target title was found
    Found(Winner),
    /// Every reachable page within the depth limit was checked
    NotFound { max_depth: usize },
    /// The search was stopped before it could finish
    Cancelled,
}

/// Final summary of a run
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    #[serde(flatten)]
    pub outcome: SearchOutcome,
    /// Pages fetched, parsed and expanded (the goal page isn't counted)
    pub pages_visited: usize,
    /// Distinct URLs some task took ownership of
    pub urls_claimed: usize,
}

impl SearchReport {
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found(_))
    }
}

#[derive(Clone)]
pub struct SearchEngine {
    shared: Arc<Shared>,
}

// Everything the tasks share. Each task holds an Arc to it.
struct Shared {
    config: SearchConfig,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    sink: Arc<dyn ResultSink>,
    visited: VisitedSet,
    signal: TerminationSignal,
    entries: EntryArena,
    pool: TaskPool,
}

impl SearchEngine {
    pub fn new(
        config: SearchConfig,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn LinkExtractor>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        let pool = TaskPool::new(config.workers);
        SearchEngine {
            shared: Arc::new(Shared {
                config,
                fetcher,
                extractor,
                sink,
                visited: VisitedSet::new(),
                signal: TerminationSignal::new(),
                entries: EntryArena::new(),
                pool,
            }),
        }
    }

    /// Runs the search to completion. Meant to be called once per engine.
    pub async fn run(&self) -> SearchReport {
        let shared = &self.shared;
        info!(
            start = %shared.config.start_url,
            target = %shared.config.target,
            max_depth = shared.config.max_depth,
            workers = shared.pool.workers(),
            "starting search"
        );

        shared
            .pool
            .submit(visit(shared.clone(), shared.config.start_url.to_string(), None));

        tokio::select! {
            biased;
            _ = shared.signal.wait_settled() => {}
            _ = shared.pool.wait_idle() => {}
        }
        // Drop whatever is still queued; running tasks see the signal and stop
        shared.pool.shutdown_now();

        let outcome = match (shared.signal.state(), shared.signal.winner()) {
            (SignalState::GoalFound, Some(winner)) => SearchOutcome::Found(winner.clone()),
            (SignalState::Running, _) => SearchOutcome::NotFound {
                max_depth: shared.config.max_depth,
            },
            _ => SearchOutcome::Cancelled,
        };

        let report = SearchReport {
            outcome,
            pages_visited: shared.entries.len(),
            urls_claimed: shared.visited.len(),
        };
        info!(
            pages_visited = report.pages_visited,
            urls_claimed = report.urls_claimed,
            found = report.is_found(),
            "search finished"
        );
        report
    }

    /// Stops a running search. Returns false if it had already ended.
    pub fn cancel(&self) -> bool {
        let cancelled = self.shared.signal.cancel();
        if cancelled {
            info!("search cancelled");
            self.shared.pool.shutdown_now();
        }
        cancelled
    }

    /// Every page visited so far, in the order they were stored
    pub fn entries(&self) -> Vec<Entry> {
        self.shared.entries.snapshot()
    }
}

// Wraps one search step as a pool task
fn visit(shared: Arc<Shared>, url: String, parent: Option<ParentRef>) -> Task {
    async move { shared.search_url(url, parent).await }.boxed()
}

impl Shared {
    async fn search_url(self: &Arc<Self>, url: String, parent: Option<ParentRef>) {
        if self.signal.is_done() {
            return;
        }

        if let Some(parent) = parent {
            if parent.depth >= self.config.max_depth {
                return;
            }
        }

        if !self.visited.try_claim(&url) {
            return;
        }

        let depth = parent.map_or(0, |p| p.depth + 1);
        info!(url = %url, depth, "searching");

        let page = match self.load(&url).await {
            Ok(page) => page,
            Err(e) if e.is_branch_local() => {
                warn!(url = %url, error = %e, "abandoning branch");
                return;
            }
            Err(e) => {
                error!(url = %url, error = %e, "unexpected error, abandoning branch");
                return;
            }
        };

        // The goal may have been found while we were downloading
        if self.signal.is_done() {
            return;
        }

        let entry = Entry::new(url, page.title, parent);
        if entry.title == self.config.target {
            self.finish(entry).await;
            return;
        }

        let this = self.entries.insert(entry);

        // Children of a page at max depth would stop at the depth check anyway
        if this.depth >= self.config.max_depth {
            return;
        }

        for link in page.links {
            let child = match self.resolve(&link) {
                Ok(child) => child,
                Err(e) => {
                    warn!(error = %e, "skipping link");
                    continue;
                }
            };

            if self.visited.contains_link(&child) {
                continue;
            }
            if !self.pool.submit(visit(self.clone(), child, Some(this))) {
                // Pool is shut down, nothing else we submit would run
                break;
            }
        }
    }

    async fn load(&self, url: &str) -> Result<PageSummary, SearchError> {
        let content = self.fetcher.fetch_page(url).await?;
        self.extractor.extract_links_and_title(&content)
    }

    // Turns "/wiki/Foo" into an absolute URL on the start page's site
    fn resolve(&self, link: &str) -> Result<String, SearchError> {
        self.config
            .start_url
            .join(link)
            .map(|url| url.to_string())
            .map_err(|e| SearchError::InvalidUrl {
                url: link.to_string(),
                reason: e.to_string(),
            })
    }

    async fn finish(&self, goal: Entry) {
        let winner = Winner {
            path: self.entries.path(&goal),
            url: goal.url,
            depth: goal.depth,
        };

        if !self.signal.try_finish(winner.clone()) {
            debug!(url = %winner.url, "goal found again, another branch already won");
            return;
        }

        info!(url = %winner.url, depth = winner.depth, path = %winner.path, "found target");
        self.pool.shutdown_now();

        if let Err(e) = self.sink.persist(&winner.path).await {
            error!(error = %e, "could not persist the result");
        }
        self.signal.settle();
    }
}
