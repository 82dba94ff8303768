use embassy_time::Instant;

use crate::color::{Gradient, Rgb};
use crate::fade::{FadePhase, FadeTimings};
use crate::inbox::{ControlReceiver, InboxProcessor, InboxSummary};
use crate::math::wrap_unit;
use crate::schedule::GradientAtTime;
use crate::state::ControllerState;
use crate::strip::render_snake;
use crate::time_warp::{DEFAULT_FAST_MODE_FACTOR, TimeWarp};

/// Configuration for the controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Shown until the first schedule arrives
    pub initial: Gradient,
    pub timings: FadeTimings,
    /// Schedule time multiplier while fast mode is on
    pub fast_mode_factor: u32,
    /// Pixels on the strip, capped at the controller's `MAX_LEDS`
    pub pixel_count: usize,
}

impl ControllerConfig {
    pub const fn new(initial: Gradient, pixel_count: usize) -> Self {
        Self {
            initial,
            timings: FadeTimings::DEFAULT,
            fast_mode_factor: DEFAULT_FAST_MODE_FACTOR,
            pixel_count,
        }
    }
}

/// Gradient controller - the control loop body
///
/// One tick is [`Controller::render`] followed by
/// [`Controller::process_inbox`]; [`crate::FrameScheduler`] drives both.
pub struct Controller<'a, S, const MAX_LEDS: usize, const INBOX_SIZE: usize> {
    // External dependencies and configuration
    inbox: InboxProcessor<'a, S, INBOX_SIZE>,
    timings: FadeTimings,
    pixel_count: usize,

    // Internal state
    state: ControllerState<S>,
    frame_buffer: [Rgb; MAX_LEDS],
}

impl<'a, S, const MAX_LEDS: usize, const INBOX_SIZE: usize> Controller<'a, S, MAX_LEDS, INBOX_SIZE>
where
    S: GradientAtTime,
{
    pub fn new(inbox: ControlReceiver<'a, S, INBOX_SIZE>, config: &ControllerConfig) -> Self {
        Self {
            inbox: InboxProcessor::new(inbox),
            timings: config.timings,
            pixel_count: config.pixel_count.min(MAX_LEDS),
            state: ControllerState::new(config.initial, TimeWarp::new(config.fast_mode_factor)),
            frame_buffer: [Rgb::default(); MAX_LEDS],
        }
    }

    /// Compute and render the gradient for `now`
    ///
    /// Re-evaluates the schedule, blends according to the fade phase,
    /// advances the scroll offset and returns the expanded frame.
    pub fn render(&mut self, now: Instant) -> &[Rgb] {
        if let Some(schedule) = &self.state.schedule {
            let schedule_now = self.state.time_warp.warp(now);
            self.state.scheduled_gradient = schedule.gradient_at(schedule_now).with_timestamp(now);
        }

        let gradient = self.phase(now).blend(
            self.state.transition_gradient.as_ref(),
            &self.state.user_gradient,
            &self.state.scheduled_gradient,
        );

        self.state.scroll_offset = wrap_unit(self.state.scroll_offset + gradient.scroll_speed());

        let frame = &mut self.frame_buffer[..self.pixel_count];
        render_snake(&gradient, self.state.scroll_offset, frame);

        self.state.current_gradient = gradient.with_timestamp(now);

        frame
    }

    /// Apply queued control messages (non-blocking)
    pub fn process_inbox(&mut self, now: Instant) -> InboxSummary {
        self.inbox.process_pending(&mut self.state, now)
    }

    /// Fade phase at `now`
    pub fn phase(&self, now: Instant) -> FadePhase {
        match &self.state.transition_gradient {
            Some(transition) => self
                .timings
                .phase(now.saturating_duration_since(transition.timestamp())),
            None => FadePhase::Scheduled,
        }
    }

    pub fn state(&self) -> &ControllerState<S> {
        &self.state
    }

    /// Last gradient actually rendered
    pub fn current_gradient(&self) -> &Gradient {
        &self.state.current_gradient
    }

    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// The most recently rendered frame
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer[..self.pixel_count]
    }
}
