//! Request clients for the NOPE API.
//!
//! This module provides:
//! - The async client ([`NopeClient`])
//! - The blocking client ([`BlockingClient`])
//! - The error taxonomy and status mapper ([`ApiError`], [`FieldIssue`])
//!
//! Both clients share one implementation; the blocking client only adds a
//! private runtime to wait on.

mod blocking;
mod client;
mod endpoint;
mod error;
mod validate;

#[cfg(test)]
mod test_fixtures;

pub use blocking::BlockingClient;
pub use client::NopeClient;
pub use error::{ApiError, FieldIssue};
