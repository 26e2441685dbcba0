//! URL list view with per-row optimistic delete.

use std::sync::Arc;

use colored::Colorize;

use crate::api::ShortenerApi;
use crate::domain::delete_flow::{self, DeleteEvent, DeletePhase};
use crate::domain::entities::{UrlEntry, UrlSnapshot};
use crate::ui::notify::{Notification, Notifier};
use crate::ui::prompt::Confirmer;
use crate::ui::state::{Refresh, Store};

/// Default width in characters of the full URL column.
pub const DEFAULT_DISPLAY_WIDTH: usize = 48;

const ELLIPSIS: char = '…';

/// Render model of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub alias: String,
    pub short_url: String,
    /// Full URL cut to the display width.
    pub full_url_display: String,
    /// Untruncated full URL (hover title / accessible label).
    pub full_url_title: String,
    /// `Pending` while a delete for this row is in flight, else `Idle`.
    pub phase: DeletePhase,
}

impl RowView {
    fn new(entry: &UrlEntry, pending: bool, width: usize) -> Self {
        Self {
            alias: entry.alias.clone(),
            short_url: entry.short_url.clone(),
            full_url_display: truncate(&entry.full_url, width),
            full_url_title: entry.full_url.clone(),
            phase: if pending {
                DeletePhase::Pending
            } else {
                DeletePhase::Idle
            },
        }
    }

    /// Delete control is disabled while a delete for this row is in flight.
    pub fn delete_enabled(&self) -> bool {
        self.phase != DeletePhase::Pending
    }

    pub fn delete_marker(&self) -> &'static str {
        if self.delete_enabled() { "🗑" } else { "⏳" }
    }

    pub fn is_truncated(&self) -> bool {
        self.full_url_display != self.full_url_title
    }
}

/// Cuts `value` to at most `width` characters, ending in an ellipsis when
/// anything was dropped.
pub fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

/// List of short URLs.
///
/// Reads from and writes to the root view's [`Store`]. Deletes are optimistic:
/// the row disappears before the request is sent and comes back if the
/// service rejects it.
#[derive(Clone)]
pub struct UrlList {
    api: Arc<dyn ShortenerApi>,
    store: Store,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    refresh: Option<Arc<dyn Refresh>>,
    display_width: usize,
}

impl UrlList {
    pub fn new(
        api: Arc<dyn ShortenerApi>,
        store: Store,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            api,
            store,
            notifier,
            confirmer,
            refresh: None,
            display_width: DEFAULT_DISPLAY_WIDTH,
        }
    }

    /// Refetch hook run after a confirmed delete.
    pub fn with_refresh(mut self, refresh: Arc<dyn Refresh>) -> Self {
        self.refresh = Some(refresh);
        self
    }

    pub fn with_display_width(mut self, width: usize) -> Self {
        self.display_width = width;
        self
    }

    /// Row models, or `None` while the list hasn't arrived.
    pub fn rows(&self) -> Option<Vec<RowView>> {
        let state = self.store.snapshot();
        if state.loading {
            return None;
        }
        Some(
            state
                .urls
                .iter()
                .map(|entry| {
                    RowView::new(
                        entry,
                        state.pending.contains(&entry.alias),
                        self.display_width,
                    )
                })
                .collect(),
        )
    }

    pub fn find(&self, alias: &str) -> Option<UrlEntry> {
        self.store.urls().iter().find(|e| e.alias == alias).cloned()
    }

    /// Renders the list as terminal text.
    pub fn render(&self) -> String {
        let Some(rows) = self.rows() else {
            return format!("  {}", "Loading URLs...".bright_black());
        };

        if rows.is_empty() {
            return format!("  {}", "No short URLs yet".yellow());
        }

        let mut lines = Vec::with_capacity(rows.len() + 4);
        lines.push(format!(
            "  {:<20} {:<32} {:<width$} {}",
            "Alias".bright_white().bold(),
            "Short URL".bright_white().bold(),
            "Full URL".bright_white().bold(),
            "Actions".bright_white().bold(),
            width = self.display_width
        ));
        lines.push(format!(
            "  {}",
            "─".repeat(20 + 32 + self.display_width + 12).bright_black()
        ));

        for row in &rows {
            let action = if row.delete_enabled() {
                row.delete_marker().normal()
            } else {
                row.delete_marker().bright_black()
            };
            lines.push(format!(
                "  {:<20} {:<32} {:<width$} {}",
                row.alias.cyan(),
                row.short_url.bright_blue().underline(),
                row.full_url_display.blue(),
                action,
                width = self.display_width
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "  Total: {}",
            rows.len().to_string().bright_white().bold()
        ));
        lines.join("\n")
    }

    /// Full details of one row, untruncated.
    pub fn render_details(&self, alias: &str) -> Option<String> {
        let entry = self.find(alias)?;
        Some(format!(
            "  Alias:     {}\n  Short URL: {}\n  Full URL:  {}",
            entry.alias.cyan(),
            entry.short_url.bright_blue(),
            entry.full_url
        ))
    }

    /// Runs the delete flow for `alias` and returns the phase it ended in.
    ///
    /// 1. Already pending, or confirmation declined: `Idle`, nothing changes.
    /// 2. Otherwise the row is removed and marked pending before the request.
    /// 3. Success: marker cleared, success notice, refresh hook (if any): `Done`.
    /// 4. Failure: pre-delete snapshot restored, marker cleared, error notice:
    ///    `RolledBack`.
    pub async fn delete(&self, alias: &str) -> DeletePhase {
        if self.store.is_pending(alias) {
            tracing::debug!(alias = %alias, "Delete already in flight");
            return DeletePhase::Idle;
        }

        if !self
            .confirmer
            .confirm(&format!("Delete alias '{alias}'?"))
        {
            return DeletePhase::Idle;
        }

        // Snapshot and optimistic removal under one lock
        let Some(Some(snapshot)) = self.store.update(|state| {
            if !state.pending.begin(alias) {
                return None;
            }
            let before = Arc::clone(&state.urls);
            state.urls = delete_flow::apply(&before, alias, DeleteEvent::Requested);
            Some(before)
        }) else {
            return DeletePhase::Idle;
        };
        let mut in_flight = InFlightDelete {
            store: &self.store,
            alias,
            snapshot: Some(snapshot),
        };
        tracing::info!(alias = %alias, "Deleting alias");

        match self.api.delete_alias(alias.to_string()).await {
            Ok(()) => {
                in_flight.confirm();
                self.notifier
                    .notify(Notification::success(format!("Deleted {alias}"), None));
                if let Some(refresh) = &self.refresh {
                    refresh.refresh().await;
                }
                DeletePhase::Done
            }
            Err(e) => {
                in_flight.roll_back();
                tracing::warn!(alias = %alias, error = %e, "Delete failed, rolled back");
                self.notifier.notify(Notification::error(
                    format!("Failed to delete {alias}"),
                    Some(e.user_message()),
                ));
                DeletePhase::RolledBack
            }
        }
    }
}

/// A delete between optimistic removal and the server's answer.
///
/// Dropped unresolved (its task was cancelled), it rolls back like a
/// failure, so the row reappears and the pending marker is cleared. After
/// teardown the store is closed and the rollback is a no-op.
struct InFlightDelete<'a> {
    store: &'a Store,
    alias: &'a str,
    snapshot: Option<UrlSnapshot>,
}

impl InFlightDelete<'_> {
    fn confirm(&mut self) {
        if self.snapshot.take().is_none() {
            return;
        }
        let alias = self.alias;
        self.store.update(|state| {
            state.urls = delete_flow::apply(&state.urls, alias, DeleteEvent::Confirmed);
            state.pending.finish(alias);
        });
    }

    fn roll_back(&mut self) {
        let Some(snapshot) = self.snapshot.take() else {
            return;
        };
        let alias = self.alias;
        self.store.update(|state| {
            state.urls = delete_flow::apply(&state.urls, alias, DeleteEvent::Failed { snapshot });
            state.pending.finish(alias);
        });
    }
}

impl Drop for InFlightDelete<'_> {
    fn drop(&mut self) {
        if self.snapshot.is_some() {
            tracing::debug!(alias = %self.alias, "Delete abandoned, rolling back");
            self.roll_back();
        }
    }
}
