//! Optimistic delete as a pure state transition.
//!
//! A delete moves through `Idle -> Pending -> Done | RolledBack` for each alias.
//! [`apply`] computes the next list for every event, and [`PendingDeletes`]
//! tracks which aliases are in flight. Neither touches I/O, so the whole flow
//! can be exercised without a server or a terminal.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::entities::UrlSnapshot;

/// Lifecycle of one alias's delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePhase {
    /// No delete running (also the result of a declined confirmation).
    Idle,
    /// Removed locally, waiting for the server.
    Pending,
    /// Server confirmed the delete.
    Done,
    /// Server rejected the delete; the snapshot was restored.
    RolledBack,
}

/// Event fed into [`apply`].
#[derive(Debug, Clone)]
pub enum DeleteEvent {
    /// Confirmation accepted: drop the alias from the local list.
    Requested,
    /// Server accepted: the local list stands until a refetch supersedes it.
    Confirmed,
    /// Server rejected: restore the list as it was before `Requested`.
    Failed { snapshot: UrlSnapshot },
}

/// Computes the list that follows `event` for `alias`.
///
/// Returns the same `Arc` whenever the list is unchanged, and the exact
/// snapshot on failure.
pub fn apply(current: &UrlSnapshot, alias: &str, event: DeleteEvent) -> UrlSnapshot {
    match event {
        DeleteEvent::Requested => {
            if !current.iter().any(|entry| entry.alias == alias) {
                return Arc::clone(current);
            }
            Arc::new(
                current
                    .iter()
                    .filter(|entry| entry.alias != alias)
                    .cloned()
                    .collect(),
            )
        }
        DeleteEvent::Confirmed => Arc::clone(current),
        DeleteEvent::Failed { snapshot } => snapshot,
    }
}

/// Aliases whose delete is in flight.
///
/// Only drives UI affordance: a pending alias has its control disabled and
/// shows an in-progress marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDeletes {
    aliases: BTreeSet<String>,
}

impl PendingDeletes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `alias` pending. Returns `false` if it already was.
    pub fn begin(&mut self, alias: &str) -> bool {
        self.aliases.insert(alias.to_string())
    }

    /// Clears the pending marker. Returns `false` if it wasn't set.
    pub fn finish(&mut self, alias: &str) -> bool {
        self.aliases.remove(alias)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains(alias)
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

}
