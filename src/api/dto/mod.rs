//! Data Transfer Objects for the shortening service.
//!
//! Field names follow the service's camelCase JSON; Rust fields stay
//! snake_case through `#[serde(rename_all = "camelCase")]`.

pub mod error;
pub mod shorten;

pub use error::ErrorResponse;
pub use shorten::{ShortenRequest, ShortenResponse};
