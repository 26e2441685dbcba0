//! # URL Shortener Client
//!
//! Terminal client for a URL shortening service: submit a long URL (with an
//! optional custom alias), list existing short URLs, and delete them with an
//! optimistic update that rolls back if the service refuses.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The [`domain::entities::UrlEntry`] model and
//!   the pure optimistic-delete transitions
//! - **API Layer** ([`api`]) - reqwest client, DTOs and the CSRF handshake
//! - **UI Layer** ([`ui`]) - Root view, form, list, notifications and tasks,
//!   independent of how they are drawn
//!
//! ## CSRF
//!
//! Mutating requests echo the `XSRF-TOKEN` cookie in an `X-XSRF-TOKEN` header.
//! When no cookie has been issued yet, the client first performs a list fetch
//! to obtain one. See [`api::csrf`].
//!
//! ## Configuration
//!
//! Client configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod ui;

pub use error::ClientError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::{HttpShortenerClient, ShortenerApi, TokenProvider};
    pub use crate::domain::delete_flow::DeletePhase;
    pub use crate::domain::entities::{UrlEntry, UrlSnapshot};
    pub use crate::error::ClientError;
    pub use crate::ui::notify::{MemoryNotifier, Notification, Notifier};
    pub use crate::ui::prompt::{AutoConfirm, Confirmer};
    pub use crate::ui::{App, ShortenForm, SubmitOutcome, UrlList};
}
