//! Sunrise/sunset lookups.
//!
//! `SolarSunTimes` computes the times locally with the NOAA solar
//! position approximation, so the schedule keeps working offline.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};
use lighthaus_composer::{ExternalLookupError, SunTimes, SunTimesLookup};

use crate::clock::WallClock;
use crate::config::{ServiceConfig, SunConfig};
use crate::error::ConfigError;

/// Zenith angle of the sun's upper limb at sunrise, including refraction
const SUNRISE_ZENITH_DEG: f64 = 90.833;

/// Sun times for a fixed location, recomputed for every date
#[derive(Debug, Clone, Copy)]
pub struct SolarSunTimes {
    latitude: f64,
    longitude: f64,
    clock: WallClock,
}

impl SolarSunTimes {
    pub const fn new(latitude: f64, longitude: f64, clock: WallClock) -> Self {
        Self {
            latitude,
            longitude,
            clock,
        }
    }

    /// Sunrise and sunset on `date`, as local seconds of the day
    ///
    /// The UTC offset is taken at each event, so dates inside daylight
    /// saving time get the summer offset.
    pub fn for_date(&self, date: NaiveDate) -> Result<SunTimes, ExternalLookupError> {
        let (sunrise_utc, sunset_utc) =
            sun_events_utc_minutes(self.latitude, self.longitude, date.ordinal())?;
        let utc_midnight = date.and_time(NaiveTime::default()).and_utc();
        let local = |minutes: f64| {
            #[allow(clippy::cast_possible_truncation)]
            let seconds = (minutes * 60.0).round() as i64;
            self.clock
                .local_second_of_day(utc_midnight + TimeDelta::seconds(seconds))
        };
        SunTimes::new(local(sunrise_utc), local(sunset_utc))
    }
}

impl SunTimesLookup for SolarSunTimes {
    fn sun_times(&mut self) -> Result<SunTimes, ExternalLookupError> {
        self.for_date(self.clock.today())
    }
}

/// The configured lookup
#[derive(Debug, Clone, Copy)]
pub enum SunSource {
    Fixed(SunTimes),
    Solar(SolarSunTimes),
}

impl SunSource {
    pub fn from_config(config: &ServiceConfig, clock: WallClock) -> Result<Self, ConfigError> {
        if let Some(fixed) = config.fixed_sun_times()? {
            return Ok(Self::Fixed(fixed));
        }
        match config.sun {
            SunConfig::Solar {
                latitude,
                longitude,
            } => Ok(Self::Solar(SolarSunTimes::new(latitude, longitude, clock))),
            SunConfig::Fixed { ref sunrise, .. } => {
                Err(ConfigError::SunTime(sunrise.clone()))
            }
        }
    }
}

impl SunTimesLookup for SunSource {
    fn sun_times(&mut self) -> Result<SunTimes, ExternalLookupError> {
        match self {
            Self::Fixed(times) => times.sun_times(),
            Self::Solar(solar) => solar.sun_times(),
        }
    }
}

/// Sunrise and sunset in minutes after UTC midnight
///
/// Longitude is positive east. Fails for polar day and polar night.
#[allow(clippy::cast_lossless)]
pub fn sun_events_utc_minutes(
    latitude: f64,
    longitude: f64,
    day_of_year: u32,
) -> Result<(f64, f64), ExternalLookupError> {
    let gamma = 2.0 * PI / 365.0 * (f64::from(day_of_year) - 1.0);

    let equation_of_time = 229.18
        * (0.000_075 + 0.001_868 * gamma.cos()
            - 0.032_077 * gamma.sin()
            - 0.014_615 * (2.0 * gamma).cos()
            - 0.040_849 * (2.0 * gamma).sin());

    let declination = 0.006_918 - 0.399_912 * gamma.cos() + 0.070_257 * gamma.sin()
        - 0.006_758 * (2.0 * gamma).cos()
        + 0.000_907 * (2.0 * gamma).sin()
        - 0.002_697 * (3.0 * gamma).cos()
        + 0.001_48 * (3.0 * gamma).sin();

    let latitude = latitude.to_radians();
    let cos_hour_angle = SUNRISE_ZENITH_DEG.to_radians().cos()
        / (latitude.cos() * declination.cos())
        - latitude.tan() * declination.tan();
    if !(-1.0..=1.0).contains(&cos_hour_angle) {
        return Err(ExternalLookupError::NoSunEvent);
    }
    let hour_angle = cos_hour_angle.acos().to_degrees();

    let sunrise = 720.0 - 4.0 * (longitude + hour_angle) - equation_of_time;
    let sunset = 720.0 - 4.0 * (longitude - hour_angle) - equation_of_time;
    Ok((sunrise, sunset))
}
