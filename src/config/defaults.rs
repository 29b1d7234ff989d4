//! Default values for configuration options.

use std::time::Duration;

/// Production API base URL.
pub const BASE_URL: &str = "https://api.nope.net";

/// Default per-request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default webhook freshness window in seconds.
pub const WEBHOOK_MAX_AGE_SECS: u64 = 300;

/// Retry-after assumed when a 429 response does not say how long to wait.
pub const RATE_LIMIT_RETRY_AFTER_SECS: u64 = 60;

/// Default per-request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default webhook freshness window as Duration.
#[must_use]
pub const fn webhook_max_age() -> Duration {
    Duration::from_secs(WEBHOOK_MAX_AGE_SECS)
}
