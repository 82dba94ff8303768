use embassy_time::Instant;

use crate::color::Gradient;
use crate::time_warp::TimeWarp;

/// Everything the control loop knows
///
/// Owned by the controller. Other components never write to it, they
/// enqueue [`crate::ControlMessage`]s instead.
#[derive(Debug, Clone)]
pub struct ControllerState<S> {
    pub(crate) scheduled_gradient: Gradient,
    pub(crate) user_gradient: Gradient,
    /// On-strip gradient at the moment of the last override, `None` before the first one
    pub(crate) transition_gradient: Option<Gradient>,
    pub(crate) current_gradient: Gradient,
    pub(crate) time_warp: TimeWarp,
    pub(crate) scroll_offset: f32,
    pub(crate) schedule: Option<S>,
}

impl<S> ControllerState<S> {
    pub(crate) const fn new(initial: Gradient, time_warp: TimeWarp) -> Self {
        Self {
            scheduled_gradient: initial,
            user_gradient: initial,
            transition_gradient: None,
            current_gradient: initial,
            time_warp,
            scroll_offset: 0.0,
            schedule: None,
        }
    }

    /// Start a new override: snapshot what is on the strip and fade from there
    pub(crate) fn apply_override(&mut self, gradient: Gradient, now: Instant) {
        self.transition_gradient = Some(self.current_gradient);
        self.user_gradient = gradient.with_timestamp(now);
    }

    pub(crate) fn replace_schedule(&mut self, schedule: S) {
        self.schedule = Some(schedule);
    }

    pub(crate) fn set_fast_mode(&mut self, enabled: bool, now: Instant) {
        self.time_warp.set_enabled(enabled, now);
    }

    pub const fn scheduled_gradient(&self) -> &Gradient {
        &self.scheduled_gradient
    }

    pub const fn user_gradient(&self) -> &Gradient {
        &self.user_gradient
    }

    pub const fn transition_gradient(&self) -> Option<&Gradient> {
        self.transition_gradient.as_ref()
    }

    /// Last gradient actually rendered
    pub const fn current_gradient(&self) -> &Gradient {
        &self.current_gradient
    }

    pub const fn fast_mode_reference(&self) -> Option<Instant> {
        self.time_warp.reference()
    }

    pub const fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub const fn schedule(&self) -> Option<&S> {
        self.schedule.as_ref()
    }
}
