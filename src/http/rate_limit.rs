//! Outbound request throttling
//!
//! Every session of the server loads from the same upstream host, so the
//! limiter is shared by all clones of an `HttpClient`.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;

type DirectLimiter = Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Requests allowed per second and the size of the initial burst
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimiterConfig {
    /// Sustained requests per second
    pub requests_per_second: u32,
    /// Requests allowed back to back before throttling starts
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::new(5, 5)
    }
}

impl RateLimiterConfig {
    /// Build a limit from a rate and burst
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// Governor quota for this limit; zero values are treated as 1
    fn quota(&self) -> Quota {
        let per_second = NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        Quota::per_second(per_second).allow_burst(burst)
    }
}

/// Token bucket shared by every clone
#[derive(Clone)]
pub struct RateLimiter {
    bucket: Arc<DirectLimiter>,
}

impl RateLimiter {
    /// Create a limiter with a full bucket
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            bucket: Arc::new(Governor::direct(config.quota())),
        }
    }

    /// Block until a request may be sent
    pub async fn wait(&self) {
        self.bucket.until_ready().await;
    }

    /// Take a permit if one is free right now
    pub fn try_acquire(&self) -> bool {
        self.bucket.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_and_partial_yaml() {
        assert_eq!(RateLimiterConfig::default(), RateLimiterConfig::new(5, 5));

        let config: RateLimiterConfig = serde_yaml::from_str("requests_per_second: 20").unwrap();
        assert_eq!(config, RateLimiterConfig::new(20, 5));
    }

    #[tokio::test]
    async fn test_burst_then_throttled() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(1, 3));

        assert!((0..3).all(|_| limiter.try_acquire()));
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_clones_share_one_bucket() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(1, 1));
        let shared = limiter.clone();

        assert!(shared.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_zero_limits_still_allow_a_request() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(0, 0));
        limiter.wait().await;
        assert!(!limiter.try_acquire());
    }
}
