//! Shortening service client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Response;
use reqwest::cookie::Jar;
use url::Url;

use super::csrf::{CSRF_HEADER, CookieJarTokenProvider, TokenProvider};
use super::dto::{ErrorResponse, ShortenRequest, ShortenResponse};
use crate::domain::entities::UrlEntry;
use crate::error::ClientError;

/// Remote operations offered by the shortening service.
///
/// # Implementations
///
/// - [`HttpShortenerClient`] - reqwest over HTTP(S)
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenerApi: Send + Sync {
    /// Creates a short URL, optionally with a custom alias.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] with the server's message (or the
    /// status text) on a non-2xx response.
    async fn shorten_url(
        &self,
        full_url: String,
        custom_alias: Option<String>,
    ) -> Result<ShortenResponse, ClientError>;

    /// Fetches the full list of short URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ListFailed`] on a non-2xx response.
    async fn list_urls(&self) -> Result<Vec<UrlEntry>, ClientError>;

    /// Deletes one alias.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] with the server's message (or the
    /// status text) on a non-2xx response.
    async fn delete_alias(&self, alias: String) -> Result<(), ClientError>;
}

/// reqwest-backed [`ShortenerApi`].
///
/// All requests share one `reqwest::Client` whose cookie jar is also read by
/// the [`TokenProvider`], so the CSRF cookie issued by any response is echoed
/// on the next mutating call.
pub struct HttpShortenerClient {
    http: reqwest::Client,
    base: Url,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpShortenerClient {
    /// Builds a client with its own cookie jar and a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] if the HTTP client cannot be built.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ClientError> {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(timeout)
            .build()?;
        let tokens = Arc::new(CookieJarTokenProvider::new(jar, base.clone()));

        Ok(Self::with_parts(http, base, tokens))
    }

    /// Assembles a client from pre-built parts.
    ///
    /// `tokens` must observe the same cookie store `http` writes to for the
    /// bootstrap to have any effect.
    pub fn with_parts(http: reqwest::Client, base: Url, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { http, base, tokens }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends one path segment (percent-encoded) to the base URL.
    fn endpoint(&self, segment: &str) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Returns the CSRF token, bootstrapping the cookie if it is missing.
    ///
    /// Falls back to an empty token and lets the server reject the request.
    async fn csrf_token(&self) -> String {
        if let Some(token) = self.tokens.token() {
            return token;
        }

        tracing::debug!("No CSRF cookie present, issuing bootstrap list fetch");
        match self.endpoint("urls") {
            Ok(url) => match self.http.get(url).send().await {
                Ok(response) => {
                    tracing::debug!(status = %response.status(), "CSRF bootstrap completed");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "CSRF bootstrap fetch failed");
                }
            },
            Err(e) => tracing::warn!(error = %e, "CSRF bootstrap URL invalid"),
        }

        self.tokens.token().unwrap_or_else(|| {
            tracing::warn!("CSRF cookie still missing after bootstrap, sending empty token");
            String::new()
        })
    }
}

#[async_trait]
impl ShortenerApi for HttpShortenerClient {
    async fn shorten_url(
        &self,
        full_url: String,
        custom_alias: Option<String>,
    ) -> Result<ShortenResponse, ClientError> {
        let url = self.endpoint("shorten")?;
        let body = ShortenRequest::new(full_url, custom_alias);
        let token = self.csrf_token().await;

        let response = self
            .http
            .post(url)
            .header(CSRF_HEADER, token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = rejection(response).await;
            tracing::warn!(error = %err, "Shorten rejected");
            return Err(err);
        }

        let created = response
            .json::<ShortenResponse>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        tracing::info!(short_url = %created.short_url, "URL shortened");
        Ok(created)
    }

    async fn list_urls(&self) -> Result<Vec<UrlEntry>, ClientError> {
        let url = self.endpoint("urls")?;
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::ListFailed { status });
        }

        let entries = response
            .json::<Vec<UrlEntry>>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        tracing::debug!(count = entries.len(), "Fetched URL list");
        Ok(entries)
    }

    async fn delete_alias(&self, alias: String) -> Result<(), ClientError> {
        let url = self.endpoint(&alias)?;
        let token = self.csrf_token().await;

        let response = self
            .http
            .delete(url)
            .header(CSRF_HEADER, token)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = rejection(response).await;
            tracing::warn!(alias = %alias, error = %err, "Delete rejected");
            return Err(err);
        }

        tracing::info!(alias = %alias, "Alias deleted");
        Ok(())
    }
}

/// Turns a non-2xx response into [`ClientError::Rejected`].
///
/// A body that isn't a JSON error object yields the status text.
async fn rejection(response: Response) -> ClientError {
    let status = response.status();
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.message);
    ClientError::rejected(status, message)
}
