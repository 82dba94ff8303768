//! Fast mode: accelerated schedule time for demos and debugging.

use embassy_time::{Duration, Instant};

/// Default acceleration, one simulated day every two real minutes
pub const DEFAULT_FAST_MODE_FACTOR: u32 = 720;

/// Time passed since `reference`, multiplied by `factor`
///
/// Instants before the reference count as zero elapsed time.
pub fn elapsed_since(reference: Instant, now: Instant, factor: u32) -> Duration {
    let real = now.saturating_duration_since(reference);
    Duration::from_micros(real.as_micros().saturating_mul(u64::from(factor)))
}

/// Maps real instants onto schedule instants
#[derive(Debug, Clone, Copy)]
pub struct TimeWarp {
    reference: Option<Instant>,
    factor: u32,
}

impl TimeWarp {
    pub const fn new(factor: u32) -> Self {
        Self {
            reference: None,
            factor,
        }
    }

    /// Instant fast mode was enabled at, if it is enabled
    pub const fn reference(&self) -> Option<Instant> {
        self.reference
    }

    pub const fn is_enabled(&self) -> bool {
        self.reference.is_some()
    }

    pub const fn factor(&self) -> u32 {
        self.factor
    }

    /// Enable or disable fast mode
    ///
    /// Enabling captures `now`, so warped time starts where real time is.
    /// Enabling twice keeps the first reference.
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        match (enabled, self.reference) {
            (true, None) => self.reference = Some(now),
            (true, Some(_)) => {}
            (false, _) => self.reference = None,
        }
    }

    /// Schedule instant for the real instant `now`
    pub fn warp(&self, now: Instant) -> Instant {
        match self.reference {
            Some(reference) => reference
                .checked_add(elapsed_since(reference, now, self.factor))
                .unwrap_or(now),
            None => now,
        }
    }
}

impl Default for TimeWarp {
    fn default() -> Self {
        Self::new(DEFAULT_FAST_MODE_FACTOR)
    }
}
