//! Transient user notifications.
//!
//! Components report outcomes through a [`Notifier`] instead of printing
//! directly, which keeps them testable and lets the binary decide how a
//! notification looks.

use std::sync::{Mutex, PoisonError};

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A one-shot message with an optional second line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            level: Level::Success,
            title: title.into(),
            description,
        }
    }

    pub fn error(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            level: Level::Error,
            title: title.into(),
            description,
        }
    }

    /// True if title or description contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.title.contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.contains(needle))
    }
}

/// Sink for notifications.
///
/// # Implementations
///
/// - [`TerminalNotifier`] - Colored lines on stdout
/// - [`MemoryNotifier`] - Keeps notifications in memory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let title = match notification.level {
            Level::Success => format!("✅ {}", notification.title).green().bold(),
            Level::Error => format!("❌ {}", notification.title).red().bold(),
        };
        println!("{title}");
        if let Some(description) = notification.description {
            println!("   {}", description.bright_black());
        }
    }
}

/// Collects notifications in arrival order.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
