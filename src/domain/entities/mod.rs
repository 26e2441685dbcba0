//! Core entities of the client data model.
//!
//! - [`UrlEntry`] - A short URL as listed by the service
//! - [`UrlSnapshot`] - An immutable list snapshot shared between views

pub mod url_entry;

pub use url_entry::UrlEntry;

use std::sync::Arc;

/// Immutable list snapshot.
///
/// Rolling back an optimistic edit restores the same `Arc`, so callers can
/// check identity with [`Arc::ptr_eq`].
pub type UrlSnapshot = Arc<Vec<UrlEntry>>;
