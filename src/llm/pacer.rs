// ABOUTME: Request pacer enforcing a minimum interval between remote call starts
// ABOUTME: Serializes overlapping callers so slots queue instead of bursting
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound request pacing.
//!
//! The generation endpoint is throttled to one request start per configured
//! interval. The decision and the timestamp update happen inside one lock
//! acquisition, so a second caller arriving during another caller's wait
//! sees the already-claimed slot and queues behind it rather than firing at
//! the same time.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Minimum-interval pacer for remote call starts
///
/// Single-process scope only. Waiters are released in mutex acquisition
/// order (FIFO under tokio's fair mutex), with no further ordering
/// guarantee.
#[derive(Debug)]
pub struct RequestPacer {
    min_interval: Duration,
    // Last *scheduled* slot, which may still be in the future while its
    // owner sleeps toward it.
    last_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// Create a pacer with the given minimum start-to-start interval
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_slot: Mutex::new(None),
        }
    }

    /// The configured minimum interval
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Claim the next request slot, sleeping until it arrives
    ///
    /// Returns once at least `min_interval` has elapsed since the previously
    /// claimed slot. The slot is claimed before the sleep, so concurrent
    /// callers accumulate delay instead of all firing after the same wait.
    pub async fn acquire(&self) {
        let slot = {
            let mut last = self.last_slot.lock().await;
            let now = Instant::now();
            let slot = match *last {
                Some(previous) => now.max(previous + self.min_interval),
                None => now,
            };
            *last = Some(slot);
            slot
        };

        let wait = slot.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            debug!(wait_ms = wait.as_millis() as u64, "pacing remote call");
        }
        sleep_until(slot).await;
    }
}
