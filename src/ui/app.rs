//! Root view: owns the canonical list and wires the form and list together.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::api::ShortenerApi;
use crate::domain::delete_flow::DeletePhase;
use crate::ui::form::ShortenForm;
use crate::ui::list::{DEFAULT_DISPLAY_WIDTH, UrlList};
use crate::ui::notify::Notifier;
use crate::ui::prompt::Confirmer;
use crate::ui::state::{Refresh, Store};
use crate::ui::task::{TaskHandle, TaskScope};

/// Refetches the list into a [`Store`].
///
/// Failures are logged, not shown: the list keeps its previous value and the
/// loading flag is cleared either way.
struct Refetcher {
    api: Arc<dyn ShortenerApi>,
    store: Store,
}

#[async_trait]
impl Refresh for Refetcher {
    async fn refresh(&self) {
        match self.api.list_urls().await {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "List refreshed");
                self.store.update(|state| {
                    state.urls = Arc::new(entries);
                    state.loading = false;
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch URLs");
                self.store.update(|state| state.loading = false);
            }
        }
    }
}

/// Top-level view.
///
/// Holds the list state, a task scope for background work and the shared
/// collaborators. [`App::teardown`] (or drop) closes the store and cancels
/// every task spawned through [`App::spawn_delete`].
pub struct App {
    api: Arc<dyn ShortenerApi>,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    store: Store,
    refetcher: Arc<Refetcher>,
    scope: TaskScope,
    mounted: AtomicBool,
    display_width: usize,
}

impl App {
    pub fn new(
        api: Arc<dyn ShortenerApi>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        let scope = TaskScope::new();
        let store = Store::new(scope.token().clone());
        let refetcher = Arc::new(Refetcher {
            api: Arc::clone(&api),
            store: store.clone(),
        });

        Self {
            api,
            notifier,
            confirmer,
            store,
            refetcher,
            scope,
            mounted: AtomicBool::new(false),
            display_width: DEFAULT_DISPLAY_WIDTH,
        }
    }

    pub fn with_display_width(mut self, width: usize) -> Self {
        self.display_width = width;
        self
    }

    /// Initial fetch. Only the first call does anything.
    pub async fn mount(&self) {
        if self.mounted.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!("Loading URL list");
        self.refetcher.refresh().await;
    }

    /// Refetches the authoritative list.
    pub async fn refresh(&self) {
        self.refetcher.refresh().await;
    }

    /// Refetch hook handed to child components.
    pub fn refresh_hook(&self) -> Arc<dyn Refresh> {
        self.refetcher.clone()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// A form whose success callback refetches this view's list.
    pub fn form(&self) -> ShortenForm {
        ShortenForm::new(
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
            self.refresh_hook(),
        )
    }

    /// The list component bound to this view's state and refetch hook.
    pub fn list(&self) -> UrlList {
        UrlList::new(
            Arc::clone(&self.api),
            self.store.clone(),
            Arc::clone(&self.notifier),
            Arc::clone(&self.confirmer),
        )
        .with_refresh(self.refresh_hook())
        .with_display_width(self.display_width)
    }

    /// Runs a delete in the background; cancelled on teardown.
    pub fn spawn_delete(&self, alias: impl Into<String>) -> TaskHandle<DeletePhase> {
        let list = self.list();
        let alias = alias.into();
        self.scope.spawn(async move { list.delete(&alias).await })
    }

    /// Cancels background work and stops all further state writes.
    pub fn teardown(&self) {
        tracing::debug!("Tearing down root view");
        self.scope.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.scope.is_cancelled()
    }
}
