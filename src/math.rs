//! Floating point helpers shared by the blending code.
//!
//! Uses `libm` so the crate stays usable without `std`.

/// Linear interpolation, `ratio` 0 yields `a`, 1 yields `b`
#[inline]
pub fn lerp(a: f32, b: f32, ratio: f32) -> f32 {
    a * (1.0 - ratio) + b * ratio
}

/// Clamp a ratio into `0.0..=1.0`, mapping NaN to 0
#[inline]
pub fn unit(ratio: f32) -> f32 {
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

/// Round and saturate a channel value into `u8`
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_channel(value: f32) -> u8 {
    libm::roundf(value).clamp(0.0, 255.0) as u8
}

/// Wrap a phase value into `0.0..1.0`
#[inline]
pub fn wrap_unit(value: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    let wrapped = libm::fmodf(value, 1.0);
    let wrapped = if wrapped < 0.0 { wrapped + 1.0 } else { wrapped };
    // fmodf of a tiny negative value can round up to exactly 1.0
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Seconds represented by an `embassy_time::Duration`, as `f32`
#[inline]
#[allow(clippy::cast_precision_loss)]
pub fn secs_f32(duration: embassy_time::Duration) -> f32 {
    duration.as_micros() as f32 / 1_000_000.0
}
