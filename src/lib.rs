#![no_std]

pub mod channel;
pub mod color;
pub mod controller;
pub mod error;
pub mod fade;
pub mod frame_scheduler;
pub mod inbox;
pub mod math;
pub mod request;
pub mod schedule;
pub mod state;
pub mod strip;
pub mod time_warp;

pub use controller::{Controller, ControllerConfig};
pub use error::{
    ExternalLookupError, RenderError, RowError, ScheduleFormatError, ValidationError,
};
pub use fade::{FadePhase, FadeTimings};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use inbox::{ControlChannel, ControlMessage, ControlReceiver, ControlSender, InboxSummary};
pub use request::{FastModeRequest, OverrideRequest, RawColor};
pub use schedule::{
    GradientAtTime, ScheduleAnchor, ScheduleInterpolator, ScheduleRow, ScheduleTable, SunTimes,
    SunTimesLookup,
};
pub use state::ControllerState;
pub use time_warp::TimeWarp;

pub use color::{Gradient, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract pixel driver trait
///
/// Implement this trait to support different hardware platforms.
/// Drivers receive the final color sequence, one entry per pixel, and may
/// reorder channels (GRB, RGB, ...) as the hardware needs.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), RenderError>;
}
