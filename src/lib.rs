//! NOPE: client library for the NOPE risk-classification API.
//!
//! A library for classifying safety risk in conversations, looking up
//! crisis resources and verifying the webhooks the service sends back.
//!
//! - [`api`]: async and blocking request clients
//! - [`webhook`]: signature and freshness checks for inbound callbacks
//! - [`config`]: client and webhook settings (builder, TOML, environment)
//! - [`types`]: request and response types
//! - [`transport`]: the HTTP seam the clients send through
//!
//! # Example
//!
//! ```no_run
//! use nope::api::NopeClient;
//! use nope::config::ClientConfig;
//! use nope::types::{EvaluateRequest, Message};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NopeClient::new(ClientConfig::builder().api_key("nope_live_...").build()?)?;
//! let result = client
//!     .evaluate(&EvaluateRequest::messages(vec![Message::user("I can't go on")]))
//!     .await?;
//! if result.show_resources {
//!     println!("{:?}", result.resources);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod time;
pub mod transport;
pub mod types;
pub mod webhook;

pub use api::{ApiError, BlockingClient, NopeClient};
pub use webhook::{SignatureError, VerifiedEvent, WebhookVerifier};
