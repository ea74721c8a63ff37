//! Rate limiting
//!
//! Two separate concerns live here:
//! - [`RateLimitInfo`]: what the server reports about its quota through the
//!   `X-Ratelimit-*` response headers.
//! - [`RateLimiter`]: an optional client-side token bucket (governor) that
//!   spaces requests out before they are sent. It never retries anything.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Header carrying the number of calls left in the current window
pub const RATE_LIMIT_REMAINING_HEADER: &str = "X-Ratelimit-Remaining";

/// Header carrying the window size
pub const RATE_LIMIT_LIMIT_HEADER: &str = "X-Ratelimit-Limit";

/// Header carrying the epoch second at which the window resets
pub const RATE_LIMIT_RESET_HEADER: &str = "X-Ratelimit-Reset";

// ============================================================================
// Server-reported quota
// ============================================================================

/// Quota information parsed from response headers
///
/// Each field is `None` when the header is absent or not an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset: Option<u64>,
}

impl RateLimitInfo {
    /// Read the `X-Ratelimit-*` headers; `None` when none of them are present
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let info = Self {
            limit: header_u64(headers, RATE_LIMIT_LIMIT_HEADER),
            remaining: header_u64(headers, RATE_LIMIT_REMAINING_HEADER),
            reset: header_u64(headers, RATE_LIMIT_RESET_HEADER),
        };
        let present = [
            RATE_LIMIT_LIMIT_HEADER,
            RATE_LIMIT_REMAINING_HEADER,
            RATE_LIMIT_RESET_HEADER,
        ]
        .iter()
        .any(|name| headers.contains_key(*name));
        present.then_some(info)
    }

    /// True when the server says no calls are left
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

// ============================================================================
// Client-side throttle
// ============================================================================

/// Configuration for the client-side throttle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Maximum number of requests per second
    pub requests_per_second: u32,
    /// Burst size (max tokens in bucket)
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

fn default_burst() -> u32 {
    1
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 1,
            burst_size: 1,
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }
}

/// Token bucket rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config (zero values become 1)
    pub fn new(config: &RateLimiterConfig) -> Self {
        let rps = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(rps).allow_burst(burst);

        Self {
            limiter: Arc::new(Governor::direct(quota)),
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit, returning immediately
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}
