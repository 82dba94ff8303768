mod blend;
mod gradient;

pub use blend::{interpolate_colors, scale_color, validate_channel};
pub use gradient::{Gradient, interpolate_gradient};
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Build a color from wide integer channels, rejecting values outside `0..=255`
pub fn try_rgb(red: i64, green: i64, blue: i64) -> Result<Rgb, crate::ValidationError> {
    Ok(Rgb::new(
        validate_channel(red)?,
        validate_channel(green)?,
        validate_channel(blue)?,
    ))
}
