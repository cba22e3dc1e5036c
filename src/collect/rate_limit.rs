// src/collect/rate_limit.rs
//! Fixed-interval request pacing for third-party APIs.
//!
//! Policy: at most one grant per `interval`. The first grant is immediate;
//! later callers wait until `interval` has passed since the previous grant.
//! Waiters are served one at a time in lock order.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug)]
pub struct RequestPacer {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// `requests` grants per `window`, evenly spaced.
    pub fn per_window(requests: u32, window: Duration) -> Self {
        Self::new(window / requests.max(1))
    }

    /// No pacing at all.
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for the next slot.
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }
        let mut next = self.next_slot.lock().await;
        if let Some(at) = *next {
            if at > Instant::now() {
                tokio::time::sleep_until(at).await;
            }
        }
        *next = Some(Instant::now() + self.interval);
    }
}
