//! Inbound user requests.
//!
//! The network listener decodes these (JSON) and turns them into
//! [`ControlMessage`]s. Validation happens here, so an invalid request
//! never reaches the controller.

use embassy_time::Instant;

use crate::color::{Gradient, try_rgb};
use crate::error::ValidationError;
use crate::inbox::ControlMessage;

/// Scroll speed and brightness used when a request leaves them out
pub const DEFAULT_REQUEST_LEVEL: f32 = 0.5;

/// Color as sent by clients, channels not yet range checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct RawColor {
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

/// `{"color": [{"r":..,"g":..,"b":..}, {..}], "scroll_speed": .., "brightness": ..}`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct OverrideRequest {
    pub color: [RawColor; 2],
    #[cfg_attr(feature = "serde", serde(default, alias = "scrollspeed"))]
    pub scroll_speed: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub brightness: Option<f32>,
}

impl OverrideRequest {
    /// Validate into a gradient stamped with `now`
    ///
    /// Channels must be in `0..=255`. Missing scroll speed or brightness
    /// default to 0.5, present ones are clamped to `0.0..=1.0`.
    pub fn into_gradient(self, now: Instant) -> Result<Gradient, ValidationError> {
        let [first, second] = self.color;
        let color_1 = try_rgb(first.r, first.g, first.b)?;
        let color_2 = try_rgb(second.r, second.g, second.b)?;
        let scroll_speed = level_or_default(self.scroll_speed)?;
        let brightness = level_or_default(self.brightness)?;
        Gradient::new(now, color_1, color_2, brightness, scroll_speed)
    }

    pub fn into_message<S>(self, now: Instant) -> Result<ControlMessage<S>, ValidationError> {
        self.into_gradient(now)
            .map(ControlMessage::UserGradientOverride)
    }
}

/// `{"fast_mode": true}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct FastModeRequest {
    pub fast_mode: bool,
}

impl FastModeRequest {
    pub fn into_message<S>(self) -> ControlMessage<S> {
        ControlMessage::FastModeToggled(self.fast_mode)
    }
}

fn level_or_default(value: Option<f32>) -> Result<f32, ValidationError> {
    match value {
        None => Ok(DEFAULT_REQUEST_LEVEL),
        Some(value) if value.is_finite() => Ok(value.clamp(0.0, 1.0)),
        Some(_) => Err(ValidationError::NotFinite),
    }
}
