// src/search/signal.rs
// =============================================================================
// The termination signal: one shared flag that says whether the search is
// still running, has found its goal, or was cancelled.
//
// States:
//   Running -> GoalFound   (a task found the target page; first one wins)
//   Running -> Cancelled   (the user pressed Ctrl-C)
// Once the state leaves Running it never changes again.
//
// Tasks check is_done() before doing anything expensive. The caller of the
// search waits on wait_settled(), which wakes up once the outcome is final
// and (for GoalFound) the winning task has finished reporting it.
// =============================================================================

use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;
use tokio::sync::watch;

const RUNNING: u8 = 0;
const GOAL_FOUND: u8 = 1;
const CANCELLED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    Running,
    GoalFound,
    Cancelled,
}

/// The page that ended the search, and how we got there
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Winner {
    pub url: String,
    pub path: String,
    pub depth: usize,
}

#[derive(Debug)]
pub struct TerminationSignal {
    state: AtomicU8,
    winner: OnceLock<Winner>,
    settled: watch::Sender<bool>,
}

impl Default for TerminationSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminationSignal {
    pub fn new() -> Self {
        let (settled, _) = watch::channel(false);
        TerminationSignal {
            state: AtomicU8::new(RUNNING),
            winner: OnceLock::new(),
            settled,
        }
    }

    /// Records `winner` if nobody has finished the search yet.
    ///
    /// Returns true only to the single caller that moved the state from
    /// Running to GoalFound. That caller is responsible for reporting the
    /// result and then calling [`settle`](Self::settle).
    pub fn try_finish(&self, winner: Winner) -> bool {
        let won = self
            .state
            .compare_exchange(RUNNING, GOAL_FOUND, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            let _ = self.winner.set(winner);
        }
        won
    }

    /// Stops the search without a result. Returns false if it was already over.
    pub fn cancel(&self) -> bool {
        let cancelled = self
            .state
            .compare_exchange(RUNNING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if cancelled {
            self.settle();
        }
        cancelled
    }

    /// Wakes everyone blocked in wait_settled()
    pub fn settle(&self) {
        self.settled.send_replace(true);
    }

    pub fn is_done(&self) -> bool {
        self.state.load(Ordering::Acquire) != RUNNING
    }

    pub fn state(&self) -> SignalState {
        match self.state.load(Ordering::Acquire) {
            RUNNING => SignalState::Running,
            GOAL_FOUND => SignalState::GoalFound,
            _ => SignalState::Cancelled,
        }
    }

    pub fn winner(&self) -> Option<&Winner> {
        self.winner.get()
    }

    /// Blocks (asynchronously) until settle() has been called
    pub async fn wait_settled(&self) {
        let mut rx = self.settled.subscribe();
        // The sender lives in self, so this can't fail with "closed"
        let _settled = rx.wait_for(|settled| *settled).await.is_ok();
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is compare_exchange?
//    - "If the value is still RUNNING, replace it with GOAL_FOUND"
//    - The check and the write happen as one step, so when two tasks find the
//      goal at the same moment only one of them gets Ok(..)
//
// 2. Why OnceLock for the winner?
//    - It can be written once and then read from anywhere without a lock
//
// 3. What is a watch channel?
//    - A channel that holds a single value that can be overwritten
//    - Receivers can wait until the value matches a condition (wait_for)
//    - No sleeping in a loop: the waiting task is woken when the value changes
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    fn winner(title: &str) -> Winner {
        Winner {
            url: format!("https://example.com/wiki/{}", title),
            path: format!("A -> {}", title),
            depth: 1,
        }
    }

    #[test]
    fn test_starts_running() {
        let signal = TerminationSignal::new();
        assert!(!signal.is_done());
        assert_eq!(signal.state(), SignalState::Running);
        assert!(signal.winner().is_none());
    }

    #[test]
    fn test_first_finish_wins() {
        let signal = TerminationSignal::new();
        assert!(signal.try_finish(winner("Target")));
        assert!(!signal.try_finish(winner("Other")));

        assert!(signal.is_done());
        assert_eq!(signal.state(), SignalState::GoalFound);
        assert_eq!(signal.winner().map(|w| w.path.as_str()), Some("A -> Target"));
    }

    #[test]
    fn test_cancel_after_goal_is_ignored() {
        let signal = TerminationSignal::new();
        assert!(signal.try_finish(winner("Target")));
        assert!(!signal.cancel());
        assert_eq!(signal.state(), SignalState::GoalFound);
    }

    #[test]
    fn test_finish_after_cancel_is_ignored() {
        let signal = TerminationSignal::new();
        assert!(signal.cancel());
        assert!(!signal.try_finish(winner("Target")));
        assert_eq!(signal.state(), SignalState::Cancelled);
        assert!(signal.winner().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_finish_has_one_winner() {
        let signal = Arc::new(TerminationSignal::new());
        let winners = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for i in 0..100 {
            let signal = signal.clone();
            let winners = winners.clone();
            handles.push(tokio::spawn(async move {
                if signal.try_finish(winner(&format!("Target_{}", i))) {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert!(signal.winner().is_some());
    }

    #[tokio::test]
    async fn test_wait_settled_wakes_on_settle() {
        let signal = Arc::new(TerminationSignal::new());

        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait_settled().await })
        };

        assert!(signal.try_finish(winner("Target")));
        signal.settle();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake up")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_settled_returns_immediately_when_already_settled() {
        let signal = TerminationSignal::new();
        assert!(signal.cancel());
        tokio::time::timeout(Duration::from_secs(1), signal.wait_settled())
            .await
            .expect("already settled");
    }
}
