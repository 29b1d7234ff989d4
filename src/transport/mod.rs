//! Transport layer for talking to the NOPE API.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The transport seam ([`HttpClient`])
//! - The production transport ([`ReqwestClient`])
//! - Transport-level failures ([`HttpError`])
//!
//! Nothing here knows about NOPE semantics: status codes are returned
//! as-is and interpreted by [`crate::api`].

mod client;
mod error;
mod http;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod http_tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
