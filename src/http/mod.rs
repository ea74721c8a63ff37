//! HTTP client module
//!
//! Provides the API client, its transport seam and response bookkeeping.
//!
//! # Features
//!
//! - **Single attempt requests**: one call per fetch, errors surface immediately
//! - **Response history**: the last few responses are kept for introspection
//! - **Rate limit headers**: `X-Ratelimit-*` values of the last response
//! - **Optional throttle**: token bucket rate limiter using governor

mod client;
mod history;
mod rate_limit;
mod transport;

pub use client::ApiClient;
pub use history::{RecordedResponse, ResponseHistory};
pub use rate_limit::{
    RateLimitInfo, RateLimiter, RateLimiterConfig, RATE_LIMIT_LIMIT_HEADER,
    RATE_LIMIT_REMAINING_HEADER, RATE_LIMIT_RESET_HEADER,
};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
