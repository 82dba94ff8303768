//! Override fade state machine.
//!
//! After a user override the strip walks forward through four phases and
//! stays in the last one until the next override:
//!
//! ```text
//! FadingIn ──fade_in──▶ Sustaining ──sustain──▶ FadingOut ──fade_out──▶ Scheduled
//! ```

use embassy_time::Duration;

use crate::color::{Gradient, interpolate_gradient};
use crate::math::{secs_f32, unit};

/// Durations of the override phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeTimings {
    /// Blend from the on-strip gradient into the user gradient
    pub fade_in: Duration,
    /// Hold the user gradient
    pub sustain: Duration,
    /// Blend from the user gradient back to the schedule
    pub fade_out: Duration,
}

impl FadeTimings {
    pub const DEFAULT: Self = Self {
        fade_in: Duration::from_secs(5),
        sustain: Duration::from_secs(30),
        fade_out: Duration::from_secs(20),
    };

    /// Time from an override until the schedule is back in control
    pub fn total(&self) -> Duration {
        self.fade_in + self.sustain + self.fade_out
    }

    /// Phase for the time elapsed since the last override
    pub fn phase(&self, elapsed: Duration) -> FadePhase {
        let sustain_start = self.fade_in;
        let fade_out_start = sustain_start + self.sustain;
        let scheduled_start = fade_out_start + self.fade_out;

        if elapsed < sustain_start {
            FadePhase::FadingIn {
                ratio: progress(elapsed, self.fade_in),
            }
        } else if elapsed < fade_out_start {
            FadePhase::Sustaining
        } else if elapsed < scheduled_start {
            FadePhase::FadingOut {
                ratio: progress(elapsed - fade_out_start, self.fade_out),
            }
        } else {
            FadePhase::Scheduled
        }
    }
}

impl Default for FadeTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Current step of the override state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadePhase {
    /// Blending from the transition gradient to the user gradient
    FadingIn { ratio: f32 },
    /// Showing the user gradient as is
    Sustaining,
    /// Blending from the user gradient to the scheduled gradient
    FadingOut { ratio: f32 },
    /// Following the schedule
    Scheduled,
}

impl FadePhase {
    /// Gradient to render in this phase
    ///
    /// Without a transition gradient (no override yet) the fade-in starts
    /// from the user gradient itself.
    pub fn blend(
        self,
        transition: Option<&Gradient>,
        user: &Gradient,
        scheduled: &Gradient,
    ) -> Gradient {
        match self {
            Self::FadingIn { ratio } => {
                interpolate_gradient(transition.unwrap_or(user), user, ratio)
            }
            Self::Sustaining => *user,
            Self::FadingOut { ratio } => interpolate_gradient(user, scheduled, ratio),
            Self::Scheduled => *scheduled,
        }
    }
}

/// Fraction of `duration` covered by `elapsed`, clamped to `0.0..=1.0`
fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.as_micros() == 0 {
        return 1.0;
    }
    unit(secs_f32(elapsed) / secs_f32(duration))
}
