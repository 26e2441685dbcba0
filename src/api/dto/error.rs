//! Error body returned by the service on non-2xx responses.

use serde::Deserialize;

/// Error payload.
///
/// Only `message` is consumed; the service also sends timestamp, status and
/// path, which are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}
