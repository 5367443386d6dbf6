//! Global rate limiter
//!
//! One limiter is shared by every crawl task. It spaces out the *start* of
//! fetches at a fixed period of `1s / requests_per_second`; how long a fetch
//! then takes is none of its business.

use crate::config::request_period;
use crate::ConfigError;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Shared tick source throttling fetch starts across all tasks
pub struct RateLimiter {
    ticker: Mutex<Interval>,
    period: Duration,
}

impl RateLimiter {
    /// Creates a limiter for the given global rate
    ///
    /// The first turn is granted immediately; each following turn comes one
    /// period after the previous one. Idle time does not bank extra turns.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Returns
    ///
    /// * `Ok(RateLimiter)` - Limiter ticking at the requested rate
    /// * `Err(ConfigError)` - Rate was not a finite number > 0, or its
    ///   period is zero or longer than a day
    pub fn new(requests_per_second: f64) -> Result<Self, ConfigError> {
        let period = request_period(requests_per_second)?;
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Ok(Self {
            ticker: Mutex::new(ticker),
            period,
        })
    }

    /// Suspends the caller until its fetch is allowed to start
    ///
    /// Waiters are served in FIFO order by the async mutex.
    pub async fn await_turn(&self) {
        self.ticker.lock().await.tick().await;
    }

    /// The fixed spacing between consecutive turns
    pub fn period(&self) -> Duration {
        self.period
    }
}
