use anyhow::{bail, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Per-frame scheduler driving the collection loop
///
/// Each call resolves once at the next refresh. The interval between
/// refreshes is not under the caller's control.
#[async_trait::async_trait]
pub trait TickSource: Send {
    /// Wait for the next refresh. `None` once the scheduler is gone.
    ///
    /// Must be cancel-safe: the recorder drops a pending call whenever a
    /// control command arrives first.
    async fn next_tick(&mut self) -> Option<Instant>;
}

/// Display-refresh style ticker backed by a tokio interval
///
/// Late ticks are skipped rather than bunched up, the way a compositor drops
/// frames instead of replaying them.
pub struct FrameTicker {
    interval: Interval,
    period: Duration,
}

impl FrameTicker {
    pub fn new(refresh_hz: f64) -> Result<Self> {
        if !refresh_hz.is_finite() || refresh_hz <= 0.0 {
            bail!("Refresh rate must be a positive number, got {}", refresh_hz);
        }

        let period = Duration::from_secs_f64(1.0 / refresh_hz);
        if period.is_zero() {
            bail!("Refresh rate {} is too high for a timer period", refresh_hz);
        }
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Ok(Self { interval, period })
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[async_trait::async_trait]
impl TickSource for FrameTicker {
    async fn next_tick(&mut self) -> Option<Instant> {
        Some(self.interval.tick().await)
    }
}

/// Ticks delivered over a channel; the scheduler is gone once all senders drop
#[async_trait::async_trait]
impl TickSource for mpsc::Receiver<()> {
    async fn next_tick(&mut self) -> Option<Instant> {
        self.recv().await.map(|()| Instant::now())
    }
}
