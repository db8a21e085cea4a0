//! Per-IP login failure limiter.
//!
//! Counts failed password attempts per client in a sliding window; once the
//! limit is hit the client is blocked until the window resets.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AuthFailureLimiter {
    inner: Arc<Mutex<HashMap<String, (u32, Instant)>>>,
    max_failures: u32,
    window: Duration,
}

impl AuthFailureLimiter {
    pub fn new(max_failures: u32, window_seconds: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            max_failures,
            window: Duration::from_secs(window_seconds),
        }
    }

    /// Record a failed attempt; returns true when the client is now blocked.
    pub async fn record_failure(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        let now = Instant::now();
        let (count, reset_at) = guard
            .entry(ip.to_string())
            .or_insert((0, now + self.window));
        if now >= *reset_at {
            *count = 0;
            *reset_at = now + self.window;
        }
        *count += 1;
        *count >= self.max_failures
    }

    pub async fn is_blocked(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        if let Some((count, reset_at)) = guard.get(ip) {
            if Instant::now() >= *reset_at {
                guard.remove(ip);
                return false;
            }
            return *count >= self.max_failures;
        }
        false
    }
}
