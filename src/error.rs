//! Client error taxonomy.
//!
//! Every failure the API client can produce maps onto one [`ClientError`]
//! variant. UI components never let these escape to the render loop; they turn
//! them into notifications via [`ClientError::user_message`].

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, DNS, TLS, timeout.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response to a mutating call.
    ///
    /// `message` is the server's `message` field when present, otherwise the
    /// canonical status text. A CSRF rejection lands here as well.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// Non-2xx response to the list fetch.
    #[error("failed to fetch URLs ({status})")]
    ListFailed { status: StatusCode },

    /// Success response with a body that doesn't match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Builds a rejection from a status and an optional server message.
    pub fn rejected(status: StatusCode, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| status_text(status));
        Self::Rejected { status, message }
    }

    /// Text shown to the user in a notification.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) => "Network error".to_string(),
            ClientError::Rejected { message, .. } => message.clone(),
            ClientError::ListFailed { .. } => "Failed to fetch URLs".to_string(),
            ClientError::Decode(_) => "Unexpected response from server".to_string(),
            ClientError::InvalidUrl(e) => format!("Invalid request URL: {e}"),
        }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Rejected { status, .. } | ClientError::ListFailed { status } => {
                Some(*status)
            }
            ClientError::Network(e) => e.status(),
            _ => None,
        }
    }
}

/// Canonical reason phrase, falling back to the numeric code.
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}
