//! HTTP client layer for the shortening service.
//!
//! This layer translates UI operations into REST calls and maps responses back
//! into domain types.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies as they appear on the wire
//! - [`csrf`] - CSRF token lookup behind the [`csrf::TokenProvider`] capability
//! - [`client`] - The [`client::ShortenerApi`] trait and its reqwest implementation

pub mod client;
pub mod csrf;
pub mod dto;

pub use client::{HttpShortenerClient, ShortenerApi};
pub use csrf::{CookieJarTokenProvider, TokenProvider};
