//! Short URL entry as returned by the shortening service.

use serde::{Deserialize, Serialize};

/// One row of the short URL list.
///
/// `alias` is unique within a single list snapshot and doubles as the row key
/// and the path segment for delete. `full_url` and `short_url` are opaque
/// strings beyond display and linking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlEntry {
    pub alias: String,
    pub full_url: String,
    pub short_url: String,
}

impl UrlEntry {
    /// Creates a new entry.
    pub fn new(
        alias: impl Into<String>,
        full_url: impl Into<String>,
        short_url: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            full_url: full_url.into(),
            short_url: short_url.into(),
        }
    }
}
