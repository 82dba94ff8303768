use crate::error::ExternalLookupError;
use crate::schedule::SECONDS_IN_DAY;

/// Sunrise and sunset as offsets into the local day, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    sunrise_second: u32,
    sunset_second: u32,
}

impl SunTimes {
    pub const fn new(sunrise_second: u32, sunset_second: u32) -> Result<Self, ExternalLookupError> {
        if sunrise_second >= SECONDS_IN_DAY {
            return Err(ExternalLookupError::OutsideOfDay(sunrise_second));
        }
        if sunset_second >= SECONDS_IN_DAY {
            return Err(ExternalLookupError::OutsideOfDay(sunset_second));
        }
        Ok(Self {
            sunrise_second,
            sunset_second,
        })
    }

    pub const fn sunrise_second(&self) -> u32 {
        self.sunrise_second
    }

    pub const fn sunset_second(&self) -> u32 {
        self.sunset_second
    }
}

/// Source of today's sun times
///
/// Implementations may hit the network or compute the times locally.
/// A failing lookup only skips one schedule refresh.
pub trait SunTimesLookup {
    fn sun_times(&mut self) -> Result<SunTimes, ExternalLookupError>;
}

impl SunTimesLookup for SunTimes {
    fn sun_times(&mut self) -> Result<SunTimes, ExternalLookupError> {
        Ok(*self)
    }
}
