//! Retry policy for campaign page requests.
//!
//! Mirrors the usual "total retries + exponential backoff + status forcelist"
//! policy: the first retry fires immediately, later ones back off as
//! `factor * 2^(n-1)` seconds, capped at `backoff_max_secs`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Statuses for which a `Retry-After` header overrides the computed backoff.
const RETRY_AFTER_STATUS_CODES: [u16; 3] = [413, 429, 503];

/// Automatic re-issue rules applied by the HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of retries (the request is sent at most `total + 1` times)
    #[serde(default = "default_total")]
    pub total: u32,

    /// Backoff factor in seconds
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,

    /// Upper bound for a single backoff wait, in seconds
    #[serde(default = "default_backoff_max_secs")]
    pub backoff_max_secs: f64,

    /// Random jitter added to each backoff (0 to this value), in seconds
    #[serde(default)]
    pub backoff_jitter_secs: f64,

    /// Response statuses that trigger a retry
    #[serde(default = "default_status_forcelist")]
    pub status_forcelist: Vec<u16>,

    /// HTTP methods that may be retried
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,

    /// Honour `Retry-After` on 413/429/503 responses
    #[serde(default = "default_respect_retry_after")]
    pub respect_retry_after: bool,
}

fn default_total() -> u32 {
    5
}

fn default_backoff_factor() -> f64 {
    0.5
}

fn default_backoff_max_secs() -> f64 {
    120.0
}

fn default_status_forcelist() -> Vec<u16> {
    vec![429, 500, 502, 503, 504]
}

fn default_allowed_methods() -> Vec<String> {
    ["GET", "HEAD", "OPTIONS"].iter().map(|m| m.to_string()).collect()
}

fn default_respect_retry_after() -> bool {
    true
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            total: default_total(),
            backoff_factor: default_backoff_factor(),
            backoff_max_secs: default_backoff_max_secs(),
            backoff_jitter_secs: 0.0,
            status_forcelist: default_status_forcelist(),
            allowed_methods: default_allowed_methods(),
            respect_retry_after: default_respect_retry_after(),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self { total: 0, ..Self::default() }
    }

    /// Returns true if requests with this method may be re-issued.
    pub fn allows_method(&self, method: &str) -> bool {
        self.allowed_methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }

    /// Returns true if a response with `status` should be retried for `method`.
    pub fn is_retryable_status(&self, method: &str, status: u16) -> bool {
        self.allows_method(method) && self.status_forcelist.contains(&status)
    }

    /// Returns true while fewer than `total` retries have been used.
    pub fn has_retries_left(&self, retries_used: u32) -> bool {
        retries_used < self.total
    }

    /// Backoff before the next attempt after `consecutive_errors` failures.
    pub fn backoff(&self, consecutive_errors: u32) -> Duration {
        if consecutive_errors <= 1 || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }

        let exponent = (consecutive_errors - 1).min(62) as i32;
        let mut secs = self.backoff_factor * 2f64.powi(exponent);

        if self.backoff_jitter_secs > 0.0 {
            secs += rand::rng().random_range(0.0..=self.backoff_jitter_secs);
        }

        Duration::from_secs_f64(secs.min(self.backoff_max_secs).max(0.0))
    }

    /// Wait requested by the server through `Retry-After`, if it applies.
    ///
    /// Only the delta-seconds form is understood; HTTP dates fall back to backoff.
    pub fn retry_after(&self, status: u16, header: Option<&str>) -> Option<Duration> {
        if !self.respect_retry_after || !RETRY_AFTER_STATUS_CODES.contains(&status) {
            return None;
        }

        header?.trim().parse::<u64>().ok().map(Duration::from_secs)
    }

    /// Wait before the next attempt: `Retry-After` when present, backoff otherwise.
    pub fn wait_for(&self, consecutive_errors: u32, status: u16, header: Option<&str>) -> Duration {
        self.retry_after(status, header).unwrap_or_else(|| self.backoff(consecutive_errors))
    }
}
