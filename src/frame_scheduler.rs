//! Tick pacing for the control loop.
//!
//! Provides portable pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping between ticks.

use embassy_time::{Duration, Instant};

use crate::error::RenderError;
use crate::inbox::InboxSummary;
use crate::schedule::GradientAtTime;
use crate::{Controller, OutputDriver};

/// Default tick period (10 ms, 100 ticks per second).
pub const DEFAULT_TICK_DURATION: Duration = Duration::from_millis(10);

/// Consecutive render failures between two warnings
pub const RENDER_FAILURE_LOG_INTERVAL: u32 = 1000;

/// Whether the `failures`-th render failure is worth a warning
///
/// The first one is, then every [`RENDER_FAILURE_LOG_INTERVAL`]-th.
pub const fn is_reported_failure(failures: u32) -> bool {
    failures == 1 || failures % RENDER_FAILURE_LOG_INTERVAL == 0
}

/// Result of a tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Set when the output driver rejected this frame
    pub render_error: Option<RenderError>,
    /// Messages applied after rendering
    pub inbox: InboxSummary,
}

/// Runs the controller and the output driver at a fixed period.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(controller, driver);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep(result.sleep_duration);
/// }
/// ```
pub struct FrameScheduler<'a, O, S, const MAX_LEDS: usize, const INBOX_SIZE: usize>
where
    O: OutputDriver,
    S: GradientAtTime,
{
    output: O,
    controller: Controller<'a, S, MAX_LEDS, INBOX_SIZE>,
    next_frame: Option<Instant>,
    frame_duration: Duration,
    render_failures: u32,
}

impl<'a, O, S, const MAX_LEDS: usize, const INBOX_SIZE: usize>
    FrameScheduler<'a, O, S, MAX_LEDS, INBOX_SIZE>
where
    O: OutputDriver,
    S: GradientAtTime,
{
    /// Create a new frame scheduler ticking every `DEFAULT_TICK_DURATION`.
    pub fn new(controller: Controller<'a, S, MAX_LEDS, INBOX_SIZE>, driver: O) -> Self {
        Self::with_frame_duration(controller, driver, DEFAULT_TICK_DURATION)
    }

    /// Create a new frame scheduler with custom tick period.
    pub fn with_frame_duration(
        controller: Controller<'a, S, MAX_LEDS, INBOX_SIZE>,
        driver: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            controller,
            next_frame: None,
            frame_duration,
            render_failures: 0,
        }
    }

    /// Run one tick and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Renders the current gradient
    /// 3. Writes to the output driver; a failed write is logged and skipped
    /// 4. Drains the control inbox
    /// 5. Returns the deadline for the next tick
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Fell behind by more than two periods: restart pacing from now
        // instead of bursting through the backlog
        let max_drift = self.frame_duration * 2;
        let next_frame = match self.next_frame {
            Some(next) if now <= next + max_drift => next,
            _ => now,
        };

        let frame = self.controller.render(now);
        let render_error = self.output.write(frame).err();
        match render_error {
            Some(_error) => {
                self.render_failures = self.render_failures.saturating_add(1);
                #[cfg(feature = "tracing")]
                if is_reported_failure(self.render_failures) {
                    tracing::warn!(error = %_error, failures = self.render_failures, "pixel write failed");
                }
            }
            None => self.render_failures = 0,
        }

        let inbox = self.controller.process_inbox(now);

        let next_frame = next_frame + self.frame_duration;
        self.next_frame = Some(next_frame);

        FrameResult {
            next_deadline: next_frame,
            sleep_duration: next_frame.saturating_duration_since(now),
            render_error,
            inbox,
        }
    }

    /// Number of consecutive frames the output driver rejected.
    pub fn render_failures(&self) -> u32 {
        self.render_failures
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub fn controller(&self) -> &Controller<'a, S, MAX_LEDS, INBOX_SIZE> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<'a, S, MAX_LEDS, INBOX_SIZE> {
        &mut self.controller
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
