//! Shared view state owned by the root view.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::delete_flow::PendingDeletes;
use crate::domain::entities::UrlSnapshot;

/// Everything the list view renders from.
#[derive(Debug, Clone)]
pub struct ListState {
    pub urls: UrlSnapshot,
    /// True until the first fetch settles, whatever its outcome.
    pub loading: bool,
    pub pending: PendingDeletes,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            urls: Arc::new(Vec::new()),
            loading: true,
            pending: PendingDeletes::new(),
        }
    }
}

/// Handle to the canonical [`ListState`].
///
/// Cloned into every component and task. Once the owning view is torn down
/// (its token cancelled) all writes become no-ops, so continuations that
/// resolve late cannot touch state nobody renders any more.
///
/// The lock is held only inside [`Store::update`] and the read accessors,
/// never across an `.await`.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<Mutex<ListState>>,
    closed: CancellationToken,
}

impl Store {
    pub fn new(closed: CancellationToken) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ListState::default())),
            closed,
        }
    }

    /// Applies `f` to the state. Returns `None` if the store is closed.
    pub fn update<R>(&self, f: impl FnOnce(&mut ListState) -> R) -> Option<R> {
        if self.closed.is_cancelled() {
            tracing::debug!("State write suppressed after teardown");
            return None;
        }
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut state))
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ListState {
        self.read(ListState::clone)
    }

    pub fn urls(&self) -> UrlSnapshot {
        self.read(|s| Arc::clone(&s.urls))
    }

    pub fn is_loading(&self) -> bool {
        self.read(|s| s.loading)
    }

    pub fn is_pending(&self, alias: &str) -> bool {
        self.read(|s| s.pending.contains(alias))
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    fn read<R>(&self, f: impl FnOnce(&ListState) -> R) -> R {
        let state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }
}

/// Parent-supplied hook that refetches the authoritative list.
#[async_trait]
pub trait Refresh: Send + Sync {
    async fn refresh(&self);
}
