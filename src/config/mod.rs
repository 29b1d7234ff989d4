//! Configuration layer for the NOPE clients.
//!
//! This module provides:
//! - Client configuration ([`ClientConfig`], [`ClientConfigBuilder`])
//! - Webhook verification settings ([`WebhookConfig`])
//! - TOML configuration file parsing ([`ConfigFile`])
//! - Layered resolution ([`Settings`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Environment** - `NOPE_API_KEY`, `NOPE_BASE_URL`, `NOPE_TIMEOUT`,
//!    `NOPE_WEBHOOK_SECRET`
//! 2. **TOML config file** - `[client]` and `[webhook]` sections
//! 3. **Built-in defaults**
//!
//! Configuration is always an explicit value owned by a client; nothing is
//! stored process-wide, so clients with different keys can coexist.

mod client;
pub mod defaults;
mod error;
mod settings;
mod toml;

#[cfg(test)]
mod toml_tests;

pub use client::{ApiKey, ClientConfig, ClientConfigBuilder, WebhookConfig, WebhookSecret};
pub use error::{ConfigError, env};
pub use settings::Settings;
pub use toml::{ConfigFile, default_config_template};
