//! Domain layer: entities and framework-independent state transitions.
//!
//! - [`entities`] - The [`entities::UrlEntry`] data model
//! - [`delete_flow`] - Pure optimistic-delete transitions and the pending set
//!
//! Nothing here knows about HTTP or terminals; the UI layer in [`crate::ui`]
//! drives these functions and renders their results.

pub mod delete_flow;
pub mod entities;
