//! Dynamic task group
//!
//! The crawl tree grows while the run is already waiting on it: any task may
//! spawn children at any time. Each spawned task owns a [`TaskToken`]; the
//! token is cloned from the parent's *before* the task is spawned, so the
//! pending count can never reach zero while a parent still has children to
//! start.
//!
//! Completion is detected through an mpsc channel that nobody ever sends
//! on: every token holds a sender, and `recv` returns `None` once the last
//! sender is gone.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Membership in a [`TaskGroup`]; the group stays open while any token lives
pub struct TaskToken {
    _done: mpsc::Sender<()>,
    pending: Arc<AtomicUsize>,
}

impl TaskToken {
    /// Spawns a new member of the group
    ///
    /// The member's token is taken before anything is handed to Tokio and
    /// passed to `task` so the member can spawn members of its own. A second
    /// token guards the spawned future itself, so the group stays open until
    /// the member finishes or panics even if `task` drops its token early.
    pub fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(TaskToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let guard = self.clone();
        let member = task(self.clone());
        tokio::spawn(async move {
            let _guard = guard;
            member.await;
        });
    }

    /// Number of tokens currently alive in the group
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

impl Clone for TaskToken {
    fn clone(&self) -> Self {
        self.pending.fetch_add(1, Ordering::SeqCst);
        Self {
            _done: self._done.clone(),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl Drop for TaskToken {
    fn drop(&mut self) {
        self.pending.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Wait-for-all group over a dynamically growing set of tasks
pub struct TaskGroup {
    token: TaskToken,
    done: mpsc::Receiver<()>,
}

impl TaskGroup {
    /// Creates an empty group
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self {
            token: TaskToken {
                _done: tx,
                pending: Arc::new(AtomicUsize::new(1)),
            },
            done: rx,
        }
    }

    /// Token for spawning members of this group
    pub fn token(&self) -> &TaskToken {
        &self.token
    }

    /// Waits until every member, including members spawned while waiting,
    /// has finished
    pub async fn wait(self) {
        let TaskGroup { token, mut done } = self;
        drop(token);
        while done.recv().await.is_some() {}
    }
}

impl Default for TaskGroup {
    fn default() -> Self {
        Self::new()
    }
}
