// src/search/visited.rs
// =============================================================================
// The set of URLs some task has already taken ownership of.
//
// Every search task races to "claim" its URL before doing any network work.
// Only one task can ever win the claim for a given URL; the rest give up on
// that branch straight away. The set only grows - nothing is ever removed.
//
// Rust concepts:
// - DashSet: A HashSet that many threads can use at once without a global lock
// - &self methods on shared data: DashSet handles the locking internally
// =============================================================================

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Claims `url` for the caller.
    //
    // Returns true exactly once per distinct URL, to the caller that now owns
    // it. DashSet::insert checks and inserts under the same shard lock, so two
    // racing callers can never both see `true`.
    pub fn try_claim(&self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    // Cheap read used to skip links that are obviously already taken before
    // submitting them. Not authoritative: the answer may be stale by the time
    // the caller acts on it, which is why try_claim still runs later.
    pub fn contains_link(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not `if !set.contains(url) { set.insert(url) }`?
//    - Between the contains() and the insert(), another thread can insert
//      the same URL. Both threads would then think they own it.
//    - insert() already tells us whether the value was new, so we use that
//      single call as the check AND the insert.
//
// 2. How does DashSet work?
//    - It splits the set into shards, each with its own lock
//    - Two threads only wait on each other if their URLs land in the same shard
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_first_claim_wins() {
        let visited = VisitedSet::new();
        assert!(visited.try_claim("https://example.com/wiki/A"));
        assert!(!visited.try_claim("https://example.com/wiki/A"));
        assert!(visited.try_claim("https://example.com/wiki/B"));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_urls_are_case_sensitive() {
        let visited = VisitedSet::new();
        assert!(visited.try_claim("https://example.com/wiki/Rust"));
        assert!(visited.try_claim("https://example.com/wiki/rust"));
    }

    #[test]
    fn test_contains_link_after_claim() {
        let visited = VisitedSet::new();
        assert!(!visited.contains_link("https://example.com/wiki/A"));
        visited.try_claim("https://example.com/wiki/A");
        assert!(visited.contains_link("https://example.com/wiki/A"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_claims_have_one_winner() {
        let visited = Arc::new(VisitedSet::new());
        let winners = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..64 {
            let visited = visited.clone();
            let winners = winners.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..20 {
                    if visited.try_claim(&format!("https://example.com/wiki/Page_{}", i)) {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // 20 distinct URLs, so exactly 20 successful claims
        assert_eq!(winners.load(Ordering::SeqCst), 20);
        assert_eq!(visited.len(), 20);
    }
}
