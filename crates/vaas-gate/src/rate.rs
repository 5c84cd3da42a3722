//! Fixed-window rate limiting
//!
//! Counter per identity key over a rolling fixed window. Approximate by
//! design: last-write-wins between concurrent requests on the same key
//! is acceptable, and state does not survive a restart. Expired entries
//! are evicted lazily on access and in bulk by [`RateLimiter::sweep`].

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds in one hour
pub const HOUR_MS: i64 = 60 * 60 * 1000;
/// Milliseconds in one day
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Current unix time in milliseconds
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: i64,
}

/// Outcome of one rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining: u32,
    /// Milliseconds until the window resets; zero when allowed
    pub retry_after_ms: i64,
}

/// Fixed-window counter keyed by identity
pub struct RateLimiter {
    limit: u32,
    window_ms: i64,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(limit: u32, window_ms: i64) -> Self {
        Self {
            limit,
            window_ms,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// N requests per hour
    pub fn per_hour(limit: u32) -> Self {
        Self::new(limit, HOUR_MS)
    }

    /// N requests per day
    pub fn per_day(limit: u32) -> Self {
        Self::new(limit, DAY_MS)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Count this request against `key` at the current time
    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, now_ms())
    }

    /// Count this request against `key` at an explicit instant.
    /// Get-or-create-then-increment is atomic per key under the map lock.
    pub fn check_at(&self, key: &str, now: i64) -> RateDecision {
        let mut windows = self.windows.lock().expect("rate window map poisoned");
        let window = windows.get(key).copied();
        match window {
            Some(w) if now <= w.reset_at => {
                if w.count >= self.limit {
                    return RateDecision {
                        allowed: false,
                        remaining: 0,
                        retry_after_ms: w.reset_at - now,
                    };
                }
                let count = w.count + 1;
                windows.insert(
                    key.to_string(),
                    Window {
                        count,
                        reset_at: w.reset_at,
                    },
                );
                RateDecision {
                    allowed: true,
                    remaining: self.limit - count,
                    retry_after_ms: 0,
                }
            }
            // Missing or expired: fresh window
            _ => {
                windows.insert(
                    key.to_string(),
                    Window {
                        count: 1,
                        reset_at: now + self.window_ms,
                    },
                );
                RateDecision {
                    allowed: true,
                    remaining: self.limit.saturating_sub(1),
                    retry_after_ms: 0,
                }
            }
        }
    }

    /// Drop every expired window. Called from a periodic task so the map
    /// does not grow unbounded under churning keys.
    pub fn sweep(&self) {
        self.sweep_at(now_ms())
    }

    pub fn sweep_at(&self, now: i64) {
        let mut windows = self.windows.lock().expect("rate window map poisoned");
        windows.retain(|_, w| now <= w.reset_at);
    }

    /// Number of live windows, for tests and metrics
    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().expect("rate window map poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nth_allowed_n_plus_first_rejected() {
        let limiter = RateLimiter::per_hour(5);
        let t0 = 1_000_000;
        for i in 0..5 {
            let decision = limiter.check_at("1.2.3.4", t0 + i);
            assert!(decision.allowed, "request {} should pass", i + 1);
        }
        let sixth = limiter.check_at("1.2.3.4", t0 + 10);
        assert!(!sixth.allowed);
        assert_eq!(sixth.remaining, 0);
        assert!(sixth.retry_after_ms > 0);
    }

    #[test]
    fn test_fresh_window_after_reset() {
        let limiter = RateLimiter::per_hour(2);
        let t0 = 0;
        assert!(limiter.check_at("ip", t0).allowed);
        assert!(limiter.check_at("ip", t0 + 1).allowed);
        assert!(!limiter.check_at("ip", t0 + 2).allowed);

        // Just past the reset boundary: counted as a fresh window
        let after = limiter.check_at("ip", t0 + HOUR_MS + 1);
        assert!(after.allowed);
        assert_eq!(after.remaining, 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::per_hour(1);
        assert!(limiter.check_at("a", 0).allowed);
        assert!(limiter.check_at("b", 0).allowed);
        assert!(!limiter.check_at("a", 1).allowed);
    }

    #[test]
    fn test_remaining_counts_down() {
        let limiter = RateLimiter::per_hour(3);
        assert_eq!(limiter.check_at("ip", 0).remaining, 2);
        assert_eq!(limiter.check_at("ip", 1).remaining, 1);
        assert_eq!(limiter.check_at("ip", 2).remaining, 0);
    }

    #[test]
    fn test_sweep_evicts_expired_only() {
        let limiter = RateLimiter::per_hour(5);
        limiter.check_at("old", 0);
        limiter.check_at("new", HOUR_MS);
        limiter.sweep_at(HOUR_MS + 1);
        assert_eq!(limiter.tracked_keys(), 1);
    }
}
