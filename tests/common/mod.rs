#![allow(dead_code)]

//! In-process fake of the shortening service.
//!
//! Serves `GET /api/urls`, `POST /api/shorten` and `DELETE /api/{alias}` on an
//! ephemeral port, issues the `XSRF-TOKEN` cookie, enforces the CSRF header on
//! mutating requests and records every request it sees.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url_shortener_client::api::HttpShortenerClient;
use url_shortener_client::api::csrf::{CSRF_COOKIE, CSRF_HEADER, cookie_value};
use url_shortener_client::domain::entities::UrlEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub csrf_header: Option<String>,
    pub cookie_token: Option<String>,
    pub body: String,
}

/// Canned failure: status plus raw response body.
#[derive(Debug, Clone)]
pub struct Failure {
    pub status: StatusCode,
    pub body: String,
}

impl Failure {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    requests: Vec<Recorded>,
    urls: Vec<UrlEntry>,
    /// Token issued on the next response that sets the cookie.
    token_seq: u32,
    current_token: Option<String>,
    issue_cookie: bool,
    rotate_on_mutation: bool,
    list_failure: Option<Failure>,
    delete_failure: Option<Failure>,
}

#[derive(Debug, Clone)]
pub struct Backend {
    inner: Arc<Mutex<Inner>>,
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend {
    /// Backend that issues a CSRF cookie on the first response lacking one.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                issue_cookie: true,
                ..Inner::default()
            })),
        }
    }

    pub fn with_urls(self, urls: Vec<UrlEntry>) -> Self {
        self.inner.lock().unwrap().urls = urls;
        self
    }

    /// Never sets the cookie.
    pub fn without_cookie(self) -> Self {
        self.inner.lock().unwrap().issue_cookie = false;
        self
    }

    /// Issues a fresh token after every successful mutation.
    pub fn rotating(self) -> Self {
        self.inner.lock().unwrap().rotate_on_mutation = true;
        self
    }

    pub fn fail_list(&self, failure: Failure) {
        self.inner.lock().unwrap().list_failure = Some(failure);
    }

    pub fn fail_delete(&self, failure: Failure) {
        self.inner.lock().unwrap().delete_failure = Some(failure);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn urls(&self) -> Vec<UrlEntry> {
        self.inner.lock().unwrap().urls.clone()
    }

    pub fn current_token(&self) -> Option<String> {
        self.inner.lock().unwrap().current_token.clone()
    }

    /// Starts serving on `127.0.0.1` and returns the bound address.
    pub async fn spawn(&self) -> SocketAddr {
        let app = Router::new()
            .route("/api/urls", get(list_urls))
            .route("/api/shorten", post(shorten))
            .route("/api/{alias}", delete(delete_alias))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }
}

/// Real client pointed at a spawned backend.
pub fn client_for(addr: SocketAddr) -> HttpShortenerClient {
    HttpShortenerClient::new(
        format!("http://{addr}/api").parse().unwrap(),
        Duration::from_secs(5),
    )
    .unwrap()
}

pub fn abc123() -> UrlEntry {
    UrlEntry::new("abc123", "https://example.com/x", "https://sho.rt/abc123")
}

fn record(inner: &mut Inner, method: &'static str, path: String, headers: &HeaderMap, body: String) {
    let csrf_header = headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let cookie_token = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| cookie_value(raw, CSRF_COOKIE));

    inner.requests.push(Recorded {
        method,
        path,
        csrf_header,
        cookie_token,
        body,
    });
}

fn issue_token(inner: &mut Inner) -> String {
    inner.token_seq += 1;
    let token = format!("tok-{}", inner.token_seq);
    inner.current_token = Some(token.clone());
    token
}

fn with_cookie(token: Option<String>, response: Response) -> Response {
    match token {
        Some(token) => (
            [(header::SET_COOKIE, format!("{CSRF_COOKIE}={token}; Path=/"))],
            response,
        )
            .into_response(),
        None => response,
    }
}

/// Rejects unless the header matches the issued token and the cookie.
fn csrf_rejection(inner: &Inner) -> Option<Response> {
    let last = inner.requests.last()?;
    let valid = match (&inner.current_token, &last.csrf_header, &last.cookie_token) {
        (Some(issued), Some(sent), Some(cookie)) => issued == sent && sent == cookie,
        _ => false,
    };
    (!valid).then(|| {
        (
            StatusCode::FORBIDDEN,
            Json(json!({ "status": 403, "error": "Forbidden", "message": "Invalid CSRF token" })),
        )
            .into_response()
    })
}

fn failure_response(failure: Failure) -> Response {
    (
        failure.status,
        [(header::CONTENT_TYPE, "application/json")],
        failure.body,
    )
        .into_response()
}

async fn list_urls(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    let mut inner = backend.inner.lock().unwrap();
    record(&mut inner, "GET", "/api/urls".to_string(), &headers, String::new());

    let new_token = (inner.issue_cookie && inner.requests.last().unwrap().cookie_token.is_none())
        .then(|| issue_token(&mut inner));

    let response = match inner.list_failure.clone() {
        Some(failure) => failure_response(failure),
        None => Json(inner.urls.clone()).into_response(),
    };
    with_cookie(new_token, response)
}

async fn shorten(State(backend): State<Backend>, headers: HeaderMap, body: String) -> Response {
    let mut inner = backend.inner.lock().unwrap();
    record(&mut inner, "POST", "/api/shorten".to_string(), &headers, body.clone());

    if let Some(rejection) = csrf_rejection(&inner) {
        return rejection;
    }

    let request: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(_) => return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Malformed body" }))).into_response(),
    };
    let Some(full_url) = request["fullUrl"].as_str().map(str::to_string) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "fullUrl is required" }))).into_response();
    };
    if !full_url.starts_with("http://") && !full_url.starts_with("https://") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": format!("Invalid URL: {full_url}") })),
        )
            .into_response();
    }

    let alias = request["customAlias"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| format!("gen{:03}", inner.urls.len() + 1));
    if inner.urls.iter().any(|e| e.alias == alias) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": format!("Alias already exists: {alias}") })),
        )
            .into_response();
    }

    let entry = UrlEntry::new(alias.clone(), full_url, format!("https://sho.rt/{alias}"));
    inner.urls.push(entry.clone());

    let new_token = inner.rotate_on_mutation.then(|| issue_token(&mut inner));
    with_cookie(new_token, Json(entry).into_response())
}

async fn delete_alias(
    State(backend): State<Backend>,
    Path(alias): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut inner = backend.inner.lock().unwrap();
    record(&mut inner, "DELETE", format!("/api/{alias}"), &headers, String::new());

    if let Some(rejection) = csrf_rejection(&inner) {
        return rejection;
    }
    if let Some(failure) = inner.delete_failure.clone() {
        return failure_response(failure);
    }

    let before = inner.urls.len();
    inner.urls.retain(|e| e.alias != alias);
    if inner.urls.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Alias not found: {alias}") })),
        )
            .into_response();
    }

    let new_token = inner.rotate_on_mutation.then(|| issue_token(&mut inner));
    with_cookie(new_token, StatusCode::NO_CONTENT.into_response())
}
