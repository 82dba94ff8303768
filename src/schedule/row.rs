//! Parsing of a single schedule file row.
//!
//! Row layout:
//! `timeslot, red_1, green_1, blue_1, red_2, green_2, blue_2, brightness, scroll_speed`
//! where `timeslot` is `HH:MM`, `SR` (sunrise) or `SS` (sunset) and
//! brightness is a percentage.

use crate::color::{Rgb, validate_channel};
use crate::error::RowError;
use crate::schedule::sun::SunTimes;

const FIELD_COUNT: usize = 9;
const CHANNEL_FIELDS: [&str; 6] = ["red_1", "green_1", "blue_1", "red_2", "green_2", "blue_2"];

/// Time label of a schedule row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    /// Fixed second of the day
    At(u32),
    Sunrise,
    Sunset,
}

impl TimeSlot {
    pub fn parse(label: &str) -> Result<Self, RowError> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("sr") || label.eq_ignore_ascii_case("sunrise") {
            return Ok(Self::Sunrise);
        }
        if label.eq_ignore_ascii_case("ss") || label.eq_ignore_ascii_case("sunset") {
            return Ok(Self::Sunset);
        }

        let (hour, minute) = label.split_once(':').ok_or(RowError::InvalidTimeslot)?;
        let hour: u32 = hour.trim().parse().map_err(|_| RowError::InvalidTimeslot)?;
        let minute: u32 = minute.trim().parse().map_err(|_| RowError::InvalidTimeslot)?;
        if hour >= 24 || minute >= 60 {
            return Err(RowError::InvalidTimeslot);
        }
        Ok(Self::At(hour * 3600 + minute * 60))
    }

    /// Resolve the label to a second of the day
    pub const fn resolve(self, sun: SunTimes) -> u32 {
        match self {
            Self::At(second) => second,
            Self::Sunrise => sun.sunrise_second(),
            Self::Sunset => sun.sunset_second(),
        }
    }
}

/// One parsed schedule row, before sun events are resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleRow {
    pub timeslot: TimeSlot,
    pub color_1: Rgb,
    pub color_2: Rgb,
    /// Brightness in percent (0-100)
    pub brightness: f32,
    pub scroll_speed: f32,
}

impl ScheduleRow {
    /// Parse a comma separated row
    pub fn parse(line: &str) -> Result<Self, RowError> {
        let mut fields = [""; FIELD_COUNT];
        let mut found = 0;
        for field in line.split(',') {
            if let Some(slot) = fields.get_mut(found) {
                *slot = field.trim();
            }
            found += 1;
        }
        if found != FIELD_COUNT {
            return Err(RowError::FieldCount {
                expected: FIELD_COUNT,
                found,
            });
        }

        let timeslot = TimeSlot::parse(fields[0])?;

        let mut channels = [0u8; 6];
        for (index, channel) in channels.iter_mut().enumerate() {
            let name = CHANNEL_FIELDS[index];
            let value: i64 = fields[index + 1]
                .parse()
                .map_err(|_| RowError::InvalidNumber(name))?;
            *channel = validate_channel(value).map_err(|_| RowError::OutOfRange(name))?;
        }

        let brightness = parse_float(fields[7], "brightness")?;
        if !(0.0..=100.0).contains(&brightness) {
            return Err(RowError::OutOfRange("brightness"));
        }
        let scroll_speed = parse_float(fields[8], "scroll_speed")?;
        if scroll_speed < 0.0 {
            return Err(RowError::OutOfRange("scroll_speed"));
        }

        Ok(Self {
            timeslot,
            color_1: Rgb::new(channels[0], channels[1], channels[2]),
            color_2: Rgb::new(channels[3], channels[4], channels[5]),
            brightness,
            scroll_speed,
        })
    }
}

fn parse_float(field: &str, name: &'static str) -> Result<f32, RowError> {
    let value: f32 = field.parse().map_err(|_| RowError::InvalidNumber(name))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RowError::InvalidNumber(name))
    }
}
