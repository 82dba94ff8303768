//! Error taxonomy of the controller.
//!
//! None of these ever escape a control loop tick: validation errors are
//! returned to producers before a message is queued, schedule and lookup
//! errors abort a single refresh cycle, render errors are logged.

use thiserror::Error;

/// A color, brightness or scroll value outside of its allowed range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("color channel {0} is outside of 0..=255")]
    ChannelOutOfRange(i64),
    #[error("brightness {0} is outside of 0.0..=1.0")]
    BrightnessOutOfRange(f32),
    #[error("scroll speed {0} must be a finite, non-negative number")]
    InvalidScrollSpeed(f32),
    #[error("value is not a finite number")]
    NotFinite,
}

/// A malformed schedule file or an unusable schedule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleFormatError {
    #[error("schedule has no anchors")]
    Empty,
    #[error("schedule has more than {0} anchors")]
    TooManyAnchors(usize),
    #[error("line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: RowError,
    },
}

/// A single schedule row that could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid timeslot, expected HH:MM, SR or SS")]
    InvalidTimeslot,
    #[error("field {0} is not a number")]
    InvalidNumber(&'static str),
    #[error("field {0} is out of range")]
    OutOfRange(&'static str),
}

/// Failure of the sunrise/sunset lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExternalLookupError {
    #[error("sun times are unavailable")]
    Unavailable,
    #[error("the sun does not rise or set on this day")]
    NoSunEvent,
    #[error("wall clock is not available")]
    NoClock,
    #[error("sun event offset {0}s is not inside a day")]
    OutsideOfDay(u32),
}

/// Failure to push a frame to the pixel hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("frame has {actual} pixels, driver expects {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("output device is disconnected")]
    Disconnected,
    #[error("output device write failed")]
    Io,
}
