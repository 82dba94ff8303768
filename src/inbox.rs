//! Control messages and their application to the controller state.

use embassy_time::Instant;

use crate::channel::{Channel, Receiver, Sender};
use crate::color::Gradient;
use crate::state::ControllerState;

/// Update sent to the control loop by an external producer
#[derive(Debug, Clone)]
pub enum ControlMessage<S> {
    /// Replace the schedule interpolator
    ScheduleUpdated(S),
    /// Show a user gradient, restarting the fade from what is on the strip
    UserGradientOverride(Gradient),
    /// Enable or disable accelerated schedule time
    FastModeToggled(bool),
}

/// Type alias for control message sender
pub type ControlSender<'a, S, const SIZE: usize> = Sender<'a, ControlMessage<S>, SIZE>;

/// Type alias for control message receiver
pub type ControlReceiver<'a, S, const SIZE: usize> = Receiver<'a, ControlMessage<S>, SIZE>;

/// Type alias for the control channel
pub type ControlChannel<S, const SIZE: usize> = Channel<ControlMessage<S>, SIZE>;

/// What a drain changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InboxSummary {
    pub schedules: usize,
    pub overrides: usize,
    /// Last fast mode toggle, if any
    pub fast_mode: Option<bool>,
}

impl InboxSummary {
    pub const fn is_empty(&self) -> bool {
        self.schedules == 0 && self.overrides == 0 && self.fast_mode.is_none()
    }
}

/// Applies queued control messages to the controller state
pub struct InboxProcessor<'a, S, const SIZE: usize> {
    messages: ControlReceiver<'a, S, SIZE>,
}

impl<'a, S, const SIZE: usize> InboxProcessor<'a, S, SIZE> {
    pub const fn new(messages: ControlReceiver<'a, S, SIZE>) -> Self {
        Self { messages }
    }

    /// Apply all pending messages in arrival order (non-blocking)
    pub fn process_pending(&mut self, state: &mut ControllerState<S>, now: Instant) -> InboxSummary {
        let mut summary = InboxSummary::default();

        for message in self.messages.drain() {
            match message {
                ControlMessage::ScheduleUpdated(schedule) => {
                    state.replace_schedule(schedule);
                    summary.schedules += 1;
                }
                ControlMessage::UserGradientOverride(gradient) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        color_1 = ?gradient.color_1(),
                        color_2 = ?gradient.color_2(),
                        brightness = gradient.brightness(),
                        scroll_speed = gradient.scroll_speed(),
                        "applying user gradient"
                    );
                    state.apply_override(gradient, now);
                    summary.overrides += 1;
                }
                ControlMessage::FastModeToggled(enabled) => {
                    #[cfg(feature = "tracing")]
                    tracing::info!(enabled, "fast mode toggled");
                    state.set_fast_mode(enabled, now);
                    summary.fast_mode = Some(enabled);
                }
            }
        }

        summary
    }
}
