//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST {base}/shorten`.
///
/// Serializes as `{"fullUrl":...,"customAlias":...}` in that order;
/// `customAlias` is omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    pub full_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_alias: Option<String>,
}

impl ShortenRequest {
    /// Builds a request; a blank alias is treated as absent.
    pub fn new(full_url: impl Into<String>, custom_alias: Option<String>) -> Self {
        Self {
            full_url: full_url.into(),
            custom_alias: custom_alias.filter(|a| !a.is_empty()),
        }
    }
}

/// Successful shorten response.
///
/// `shortUrl` is the only field the client relies on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub full_url: Option<String>,
}
