//! Token bucket rate limiter for one provider.
//!
//! Each adapter owns one bucket holding a single token, refilled once per
//! `min_request_interval`. Upstream calls are therefore spaced at least that
//! far apart. A zero interval disables limiting.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Token bucket state.
#[derive(Debug)]
struct TokenBucket {
    /// Current number of available tokens.
    tokens: f64,
    last_update: Instant,
    /// Token refill rate (tokens per second).
    rate: f64,
    capacity: f64,
}

impl TokenBucket {
    fn new(interval: Duration, capacity: f64) -> Self {
        Self {
            tokens: capacity,
            last_update: Instant::now(),
            rate: 1.0 / interval.as_secs_f64(),
            capacity,
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_update = now;
    }

    fn try_acquire(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn time_until_available(&mut self) -> Duration {
        self.refill();

        if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64((1.0 - self.tokens) / self.rate).unwrap_or(Duration::MAX)
        }
    }
}

/// Spaces one provider's upstream requests.
#[derive(Debug)]
pub struct RateLimiter {
    provider: String,
    /// `None` when the interval is zero.
    bucket: Option<Mutex<TokenBucket>>,
}

impl RateLimiter {
    pub fn new(provider: impl Into<String>, min_interval: Duration) -> Self {
        let bucket = if min_interval.is_zero() {
            None
        } else {
            Some(Mutex::new(TokenBucket::new(min_interval, 1.0)))
        };

        Self {
            provider: provider.into(),
            bucket,
        }
    }

    /// Lock the bucket, recovering from poison if necessary.
    ///
    /// The worst case after recovery is one request spaced slightly wrong.
    fn lock_bucket<'a>(&self, bucket: &'a Mutex<TokenBucket>) -> MutexGuard<'a, TokenBucket> {
        bucket.lock().unwrap_or_else(|poisoned| {
            warn!(provider = %self.provider, "Rate limiter mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Wait (asynchronously) until a request may be sent.
    pub async fn acquire(&self) {
        let Some(bucket) = &self.bucket else {
            return;
        };

        loop {
            let wait_time = {
                let mut bucket = self.lock_bucket(bucket);
                if bucket.try_acquire() {
                    return;
                }
                bucket.time_until_available()
            };

            if wait_time > Duration::ZERO {
                debug!(provider = %self.provider, ?wait_time, "Rate limiter: waiting");
                tokio::time::sleep(wait_time).await;
            }
        }
    }

    /// Take a token without waiting. Returns false if rate limited.
    pub fn try_acquire(&self) -> bool {
        match &self.bucket {
            Some(bucket) => self.lock_bucket(bucket).try_acquire(),
            None => true,
        }
    }
}
