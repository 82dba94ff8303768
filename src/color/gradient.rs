use embassy_time::Instant;

use crate::color::{Rgb, interpolate_colors};
use crate::error::ValidationError;
use crate::math::{lerp, unit};

/// A two-color look with brightness and scroll speed
///
/// `timestamp` records when the value was computed or became active.
/// Gradients are snapshots: blending produces a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    timestamp: Instant,
    color_1: Rgb,
    color_2: Rgb,
    brightness: f32,
    scroll_speed: f32,
}

impl Gradient {
    /// Create a validated gradient
    ///
    /// Brightness must be in `0.0..=1.0`, scroll speed finite and non-negative.
    pub fn new(
        timestamp: Instant,
        color_1: Rgb,
        color_2: Rgb,
        brightness: f32,
        scroll_speed: f32,
    ) -> Result<Self, ValidationError> {
        if !brightness.is_finite() {
            return Err(ValidationError::NotFinite);
        }
        if !(0.0..=1.0).contains(&brightness) {
            return Err(ValidationError::BrightnessOutOfRange(brightness));
        }
        if !scroll_speed.is_finite() || scroll_speed < 0.0 {
            return Err(ValidationError::InvalidScrollSpeed(scroll_speed));
        }
        Ok(Self {
            timestamp,
            color_1,
            color_2,
            brightness,
            scroll_speed,
        })
    }

    /// Full-brightness gradient that does not scroll
    pub const fn solid(timestamp: Instant, color_1: Rgb, color_2: Rgb) -> Self {
        Self {
            timestamp,
            color_1,
            color_2,
            brightness: 1.0,
            scroll_speed: 0.0,
        }
    }

    pub const fn timestamp(&self) -> Instant {
        self.timestamp
    }

    pub const fn color_1(&self) -> Rgb {
        self.color_1
    }

    pub const fn color_2(&self) -> Rgb {
        self.color_2
    }

    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    pub const fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    /// Copy of this gradient stamped with another instant
    #[must_use]
    pub const fn with_timestamp(self, timestamp: Instant) -> Self {
        Self { timestamp, ..self }
    }

    /// Same look, ignoring when it was computed
    pub fn same_look(&self, other: &Self) -> bool {
        self.color_1 == other.color_1
            && self.color_2 == other.color_2
            && self.brightness == other.brightness
            && self.scroll_speed == other.scroll_speed
    }
}

/// Blend two gradients component-wise
///
/// `ratio` 0 yields `from`, 1 yields `to`. The timestamp is NOT blended,
/// the result carries `from`'s timestamp and callers restamp it.
pub fn interpolate_gradient(from: &Gradient, to: &Gradient, ratio: f32) -> Gradient {
    let ratio = unit(ratio);
    Gradient {
        timestamp: from.timestamp,
        color_1: interpolate_colors(from.color_1, to.color_1, ratio),
        color_2: interpolate_colors(from.color_2, to.color_2, ratio),
        brightness: lerp(from.brightness, to.brightness, ratio),
        scroll_speed: lerp(from.scroll_speed, to.scroll_speed, ratio),
    }
}
