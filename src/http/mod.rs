//! HTTP client module
//!
//! Provides the client used to retrieve the campaign document.
//!
//! # Features
//!
//! - **Timeouts**: Every attempt is bounded by the client timeout
//! - **Opt-in Retries**: Disabled by default; constant, linear or exponential backoff when enabled
//! - **Rate Limiting**: Token bucket rate limiter using governor, shared across sessions

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
