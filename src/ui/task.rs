//! Cancellable background tasks tied to a view's lifetime.
//!
//! A [`TaskScope`] owns a parent [`CancellationToken`]. Every task it spawns
//! races against a child token. Cancelling the scope (or dropping it)
//! abandons the task's continuation, so no state write follows teardown.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Parent of all tasks spawned for one view.
#[derive(Debug, Default)]
pub struct TaskScope {
    token: CancellationToken,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token cancelled on teardown. Share it with anything that must stop
    /// writing once the view is gone.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Spawns `fut` on the runtime.
    ///
    /// The future is dropped at its next suspension point once either the
    /// returned handle or the scope is cancelled.
    pub fn spawn<F>(&self, fut: F) -> TaskHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let cancel = self.token.child_token();
        let guard = cancel.clone();
        let join = tokio::spawn(async move {
            tokio::select! {
                biased;
                () = guard.cancelled() => None,
                out = fut => Some(out),
            }
        });
        TaskHandle { cancel, join }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Handle to one spawned task.
#[derive(Debug)]
pub struct TaskHandle<T> {
    cancel: CancellationToken,
    join: JoinHandle<Option<T>>,
}

impl<T> TaskHandle<T> {
    /// Abandons the task's continuation.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Waits for the task. `None` if it was cancelled or panicked.
    pub async fn join(self) -> Option<T> {
        match self.join.await {
            Ok(out) => out,
            Err(e) => {
                tracing::error!(error = %e, "Background task failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_spawn_returns_output() {
        let scope = TaskScope::new();
        let handle = scope.spawn(async { 41 + 1 });
        assert_eq!(handle.join().await, Some(42));
    }

    #[tokio::test]
    async fn test_scope_cancel_suppresses_continuation() {
        let scope = TaskScope::new();
        let gate = Arc::new(Notify::new());
        let wrote = Arc::new(AtomicBool::new(false));

        let handle = {
            let gate = Arc::clone(&gate);
            let wrote = Arc::clone(&wrote);
            scope.spawn(async move {
                gate.notified().await;
                wrote.store(true, Ordering::SeqCst);
            })
        };

        scope.cancel();
        gate.notify_one();

        assert_eq!(handle.join().await, None);
        assert!(!wrote.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_handle_cancel_is_local() {
        let scope = TaskScope::new();
        let gate = Arc::new(Notify::new());

        let first = {
            let gate = Arc::clone(&gate);
            scope.spawn(async move { gate.notified().await })
        };
        let second = scope.spawn(async { "done" });

        first.cancel();
        assert!(first.is_cancelled());
        assert_eq!(first.join().await, None);
        assert_eq!(second.join().await, Some("done"));
        assert!(!scope.is_cancelled());
    }

    #[tokio::test]
    async fn test_drop_cancels_token() {
        let token = {
            let scope = TaskScope::new();
            scope.token().clone()
        };
        assert!(token.is_cancelled());
    }
}
