use crate::color::Rgb;
use crate::error::ValidationError;
use crate::math::{lerp, round_channel, unit};

/// Check that a channel value fits into `0..=255`
pub fn validate_channel(value: i64) -> Result<u8, ValidationError> {
    u8::try_from(value).map_err(|_| ValidationError::ChannelOutOfRange(value))
}

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color, returned as is for `ratio == 0.0`
/// * `b` - Second color, returned as is for `ratio == 1.0`
/// * `ratio` - Blend factor, clamped into `0.0..=1.0`
///
/// Every output channel lies between the matching input channels.
#[inline]
pub fn interpolate_colors(a: Rgb, b: Rgb, ratio: f32) -> Rgb {
    let ratio = unit(ratio);
    Rgb {
        r: round_channel(lerp(f32::from(a.r), f32::from(b.r), ratio)),
        g: round_channel(lerp(f32::from(a.g), f32::from(b.g), ratio)),
        b: round_channel(lerp(f32::from(a.b), f32::from(b.b), ratio)),
    }
}

/// Scale a color by a brightness fraction (0.0-1.0)
#[inline]
pub fn scale_color(color: Rgb, brightness: f32) -> Rgb {
    let brightness = unit(brightness);
    Rgb {
        r: round_channel(f32::from(color.r) * brightness),
        g: round_channel(f32::from(color.g) * brightness),
        b: round_channel(f32::from(color.b) * brightness),
    }
}
