// src/search/pool.rs
// =============================================================================
// A task pool with a fixed number of workers and an unbounded queue.
//
// How it works:
// - submit() never blocks: it spawns a tokio task straight away
// - Before running its work, that tokio task must take one of N semaphore
//   permits. Tasks waiting for a permit are the pool's "queue".
// - shutdown_now() closes the semaphore. Every task still waiting for a
//   permit fails to get one and exits without running its work, so the
//   whole queue is dropped at once. Tasks already holding a permit keep
//   running; they are expected to notice the termination signal themselves.
// - wait_idle() resolves once every submitted task has either run or been
//   discarded.
//
// There is no priority or work stealing; the semaphore hands out permits in
// FIFO order, which is fair enough for a crawl.
//
// Rust concepts:
// - Arc: Shared ownership of the pool state between the pool and its tasks
// - Semaphore: Limits how many tasks run at the same time
// - Drop: Runs clean-up code even if a task panics
// =============================================================================

use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};
use tracing::debug;

/// One unit of work for the pool
pub type Task = BoxFuture<'static, ()>;

#[derive(Debug, Clone)]
pub struct TaskPool {
    inner: Arc<PoolInner>,
}

#[derive(Debug)]
struct PoolInner {
    workers: usize,
    permits: Semaphore,
    // Submitted tasks that haven't finished or been discarded yet
    outstanding: AtomicUsize,
    closed: AtomicBool,
    idle: watch::Sender<bool>,
}

impl PoolInner {
    fn task_done(&self) {
        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.idle.send_replace(true);
        }
    }
}

// Decrements the outstanding count when dropped, so a panicking task
// can't leave wait_idle() hanging forever
struct Outstanding(Arc<PoolInner>);

impl Drop for Outstanding {
    fn drop(&mut self) {
        self.0.task_done();
    }
}

impl TaskPool {
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        let (idle, _) = watch::channel(true);
        TaskPool {
            inner: Arc::new(PoolInner {
                workers,
                permits: Semaphore::new(workers),
                outstanding: AtomicUsize::new(0),
                closed: AtomicBool::new(false),
                idle,
            }),
        }
    }

    pub fn workers(&self) -> usize {
        self.inner.workers
    }

    /// Queues `task`. Returns false (and drops the task) if the pool has
    /// been shut down.
    ///
    /// New work must come either from the caller before it starts waiting,
    /// or from a task that is itself running in this pool. That way the
    /// outstanding count can't reach zero while more work is on its way.
    pub fn submit(&self, task: Task) -> bool {
        if self.inner.closed.load(Ordering::Acquire) {
            return false;
        }

        if self.inner.outstanding.fetch_add(1, Ordering::AcqRel) == 0 {
            self.inner.idle.send_replace(false);
        }

        let guard = Outstanding(self.inner.clone());
        tokio::spawn(async move {
            let inner = guard.0.clone();
            match inner.permits.acquire().await {
                Ok(_permit) => task.await,
                Err(_) => debug!("pool shut down, dropping queued task"),
            }
            drop(guard);
        });

        true
    }

    /// Stops accepting work and throws away everything still queued.
    /// Returns immediately; running tasks are left to finish on their own.
    pub fn shutdown_now(&self) {
        if !self.inner.closed.swap(true, Ordering::AcqRel) {
            self.inner.permits.close();
            debug!(
                outstanding = self.outstanding(),
                "task pool shut down"
            );
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Tasks submitted but not yet finished or discarded
    pub fn outstanding(&self) -> usize {
        self.inner.outstanding.load(Ordering::Acquire)
    }

    /// Waits until no submitted task is left
    pub async fn wait_idle(&self) {
        let mut rx = self.inner.idle.subscribe();
        // The sender lives in self.inner, so this can't fail with "closed"
        let _idle = rx.wait_for(|idle| *idle).await.is_ok();
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is BoxFuture?
//    - A future stored on the heap: Pin<Box<dyn Future<Output = T> + Send>>
//    - Lets us store futures of different concrete types behind one type
//    - Needed for recursion: a search task submits more search tasks
//
// 2. What happens when a Semaphore is closed?
//    - acquire() returns Err for everyone waiting and everyone who asks later
//    - Permits already handed out stay valid until they are dropped
//
// 3. Why tokio::spawn for every task, even queued ones?
//    - Spawning is cheap (a small allocation), and it means submit() never
//      has to wait
//    - The real limit on concurrency is the semaphore, not the spawn
// -----------------------------------------------------------------------------
