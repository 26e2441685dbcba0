//! Presentation layer: framework-independent view components.
//!
//! # Modules
//!
//! - [`app`] - Root view owning the list state
//! - [`form`] - Shorten form
//! - [`list`] - URL list with optimistic delete
//! - [`state`] - Shared [`state::Store`] and the [`state::Refresh`] hook
//! - [`task`] - Cancellable background tasks
//! - [`notify`] - Transient notifications
//! - [`prompt`] - Confirmation prompts
//! - [`clipboard`] - OSC 52 copy

pub mod app;
pub mod clipboard;
pub mod form;
pub mod list;
pub mod notify;
pub mod prompt;
pub mod state;
pub mod task;

pub use app::App;
pub use form::{ShortenForm, SubmitOutcome};
pub use list::UrlList;
