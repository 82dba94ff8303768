//! Folded "snake" strip layout.
//!
//! The strip is mounted folded in half, so the first pixel sits next to the
//! last one:
//!
//! ```text
//! 3 4
//! 2 5
//! 1 6
//! 0 7
//! ```
//!
//! Position `i` and its mirror `len - 1 - i` always show the same color.

use crate::color::{Gradient, Rgb, interpolate_colors, scale_color};

/// Map a line from 0 to 1 onto a triangle going 0 → 1 → 0
#[inline]
pub fn triangle(ratio: f32) -> f32 {
    let doubled = 2.0 * ratio;
    if doubled <= 1.0 { doubled } else { 2.0 - doubled }
}

/// Move `ratio` by `offset`, wrapping around at 1.0
#[inline]
pub fn shift(ratio: f32, offset: f32) -> f32 {
    let shifted = ratio + offset;
    if shifted < 0.0 {
        shifted + 1.0
    } else if shifted > 1.0 {
        shifted - 1.0
    } else {
        shifted
    }
}

/// Number of pixels in one mirrored half
pub const fn half_len(len: usize) -> usize {
    len / 2
}

/// Blend ratio of the `step`-th sample along a half of `half` samples
#[inline]
#[allow(clippy::cast_precision_loss)]
pub fn sample_ratio(step: usize, half: usize, offset: f32) -> f32 {
    let position = if half > 1 {
        step as f32 / (half - 1) as f32
    } else {
        0.0
    };
    triangle(shift(position, offset))
}

/// Fill `leds` with `gradient` scrolled by `offset`
///
/// Each half gets a triangle blend between the two colors, scaled by the
/// gradient brightness. For odd lengths the centre pixel repeats the last
/// sample of the first half.
pub fn render_snake(gradient: &Gradient, offset: f32, leds: &mut [Rgb]) {
    let len = leds.len();
    if len == 0 {
        return;
    }
    if len == 1 {
        leds[0] = scale_color(gradient.color_1(), gradient.brightness());
        return;
    }

    let half = half_len(len);
    for step in 0..half {
        let ratio = sample_ratio(step, half, offset);
        let color = scale_color(
            interpolate_colors(gradient.color_1(), gradient.color_2(), ratio),
            gradient.brightness(),
        );
        leds[step] = color;
        leds[len - 1 - step] = color;
    }

    if !len.is_multiple_of(2) {
        leds[half] = leds[half - 1];
    }
}
