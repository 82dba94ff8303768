//! Service configuration.
//!
//! Loaded from a JSON file; every field has a default, so an empty object
//! (or no file at all) is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use lighthaus_composer::schedule::TimeSlot;
use lighthaus_composer::time_warp::DEFAULT_FAST_MODE_FACTOR;
use lighthaus_composer::{ControllerConfig, Duration, FadeTimings, Gradient, Instant, Rgb, SunTimes};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::ConfigError;

/// Largest strip the service renders
pub const MAX_LEDS: usize = 600;

/// Environment variable holding the config path
pub const CONFIG_ENV: &str = "LIGHTHAUS_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub pixel_count: usize,
    pub tick_ms: u64,
    pub fade_in_secs: u64,
    pub sustain_secs: u64,
    pub fade_out_secs: u64,
    pub fast_mode_factor: u32,
    pub schedule_file: PathBuf,
    pub refresh_secs: u64,
    pub listen_addr: String,
    /// IANA time zone the schedule is written in, e.g. `America/Los_Angeles`
    pub timezone: String,
    pub sun: SunConfig,
    pub output: OutputKind,
    pub log_level: String,
    pub initial: InitialGradient,
}

/// Where sunrise and sunset come from
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SunConfig {
    /// Same times every day, as `HH:MM`
    Fixed { sunrise: String, sunset: String },
    /// Computed for the current date at a location
    Solar { latitude: f64, longitude: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Colored blocks on the terminal
    Terminal,
    /// Discard frames
    None,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialGradient {
    pub color_1: [u8; 3],
    pub color_2: [u8; 3],
    pub brightness: f32,
    pub scroll_speed: f32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            pixel_count: 120,
            tick_ms: 10,
            fade_in_secs: 5,
            sustain_secs: 30,
            fade_out_secs: 20,
            fast_mode_factor: DEFAULT_FAST_MODE_FACTOR,
            schedule_file: PathBuf::from("color_schedule.csv"),
            refresh_secs: 1,
            listen_addr: String::from("0.0.0.0:5000"),
            timezone: String::from("America/Los_Angeles"),
            sun: SunConfig::Solar {
                latitude: 37.7749,
                longitude: -122.4194,
            },
            output: OutputKind::Terminal,
            log_level: String::from("info"),
            initial: InitialGradient::default(),
        }
    }
}

impl Default for InitialGradient {
    fn default() -> Self {
        Self {
            color_1: [255, 0, 0],
            color_2: [0, 0, 255],
            brightness: 1.0,
            scroll_speed: 0.01,
        }
    }
}

impl ServiceConfig {
    /// Load from `path`, or use defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_json(&text)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pixel_count > MAX_LEDS {
            return Err(ConfigError::TooManyPixels {
                requested: self.pixel_count,
                max: MAX_LEDS,
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        self.zone()?;
        if let SunConfig::Fixed { sunrise, sunset } = &self.sun {
            parse_clock_time(sunrise)?;
            parse_clock_time(sunset)?;
        }
        Ok(())
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_secs.max(1))
    }

    /// The configured time zone
    pub fn zone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse()
            .map_err(|_| ConfigError::TimeZone(self.timezone.clone()))
    }

    pub fn controller_config(&self, now: Instant) -> Result<ControllerConfig, ConfigError> {
        let [r1, g1, b1] = self.initial.color_1;
        let [r2, g2, b2] = self.initial.color_2;
        let initial = Gradient::new(
            now,
            Rgb::new(r1, g1, b1),
            Rgb::new(r2, g2, b2),
            self.initial.brightness,
            self.initial.scroll_speed,
        )?;

        Ok(ControllerConfig {
            initial,
            timings: FadeTimings {
                fade_in: Duration::from_secs(self.fade_in_secs),
                sustain: Duration::from_secs(self.sustain_secs),
                fade_out: Duration::from_secs(self.fade_out_secs),
            },
            fast_mode_factor: self.fast_mode_factor,
            pixel_count: self.pixel_count,
        })
    }

    /// Fixed sun times, if configured
    pub fn fixed_sun_times(&self) -> Result<Option<SunTimes>, ConfigError> {
        let SunConfig::Fixed { sunrise, sunset } = &self.sun else {
            return Ok(None);
        };
        let sunrise = parse_clock_time(sunrise)?;
        let sunset = parse_clock_time(sunset)?;
        SunTimes::new(sunrise, sunset)
            .map(Some)
            .map_err(|_| ConfigError::SunTime(format!("{sunrise}/{sunset}")))
    }
}

fn parse_clock_time(value: &str) -> Result<u32, ConfigError> {
    match TimeSlot::parse(value) {
        Ok(TimeSlot::At(second)) => Ok(second),
        _ => Err(ConfigError::SunTime(value.to_owned())),
    }
}
