//! Daily lighting schedule.
//!
//! A schedule is a sorted, circular table of anchors (a second of the day
//! plus a gradient). Between two anchors the gradient is blended linearly;
//! the gap between the last anchor and the first one wraps through midnight.

mod row;
mod sun;

use embassy_time::Instant;
use heapless::Vec;

pub use row::{ScheduleRow, TimeSlot};
pub use sun::{SunTimes, SunTimesLookup};

use crate::color::{Gradient, interpolate_gradient};
use crate::error::{RowError, ScheduleFormatError};

/// Seconds in one day
pub const SECONDS_IN_DAY: u32 = 86_400;

/// Maximum number of anchors a schedule can hold
pub const MAX_ANCHORS: usize = 48;

const DAY_MICROS: u64 = SECONDS_IN_DAY as u64 * 1_000_000;

/// Fixed point in the daily cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleAnchor {
    pub second_of_day: u32,
    /// Brightness is a fraction, the timestamp is unused
    pub gradient: Gradient,
}

/// Sorted anchor table with at least one entry
#[derive(Debug, Clone)]
pub struct ScheduleTable {
    anchors: Vec<ScheduleAnchor, MAX_ANCHORS>,
}

impl ScheduleTable {
    /// Build a table from parsed rows, resolving sunrise and sunset
    ///
    /// Anchors sharing a second keep their input order.
    pub fn from_rows<I>(rows: I, sun: SunTimes) -> Result<Self, ScheduleFormatError>
    where
        I: IntoIterator<Item = ScheduleRow>,
    {
        let mut table = Self { anchors: Vec::new() };
        for (index, row) in rows.into_iter().enumerate() {
            let anchor = anchor_from_row(&row, sun).map_err(|source| ScheduleFormatError::Row {
                line: index + 1,
                source,
            })?;
            table.insert(anchor)?;
        }
        table.ensure_not_empty()
    }

    /// Parse a whole schedule file
    ///
    /// Blank lines, `#` comments and a `timeslot,...` header are skipped.
    pub fn parse(text: &str, sun: SunTimes) -> Result<Self, ScheduleFormatError> {
        let mut table = Self { anchors: Vec::new() };
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || is_header(line) {
                continue;
            }
            let anchor = ScheduleRow::parse(line)
                .and_then(|row| anchor_from_row(&row, sun))
                .map_err(|source| ScheduleFormatError::Row {
                    line: index + 1,
                    source,
                })?;
            table.insert(anchor)?;
        }
        table.ensure_not_empty()
    }

    pub fn anchors(&self) -> &[ScheduleAnchor] {
        &self.anchors
    }

    fn insert(&mut self, anchor: ScheduleAnchor) -> Result<(), ScheduleFormatError> {
        let position = self
            .anchors
            .partition_point(|existing| existing.second_of_day <= anchor.second_of_day);
        self.anchors
            .push(anchor)
            .map_err(|_| ScheduleFormatError::TooManyAnchors(MAX_ANCHORS))?;
        self.anchors[position..].rotate_right(1);
        Ok(())
    }

    fn ensure_not_empty(self) -> Result<Self, ScheduleFormatError> {
        if self.anchors.is_empty() {
            Err(ScheduleFormatError::Empty)
        } else {
            Ok(self)
        }
    }

    /// Gradient at `seconds_into_day`, stamped with `now`
    ///
    /// Queries before the first anchor or at/after the last one fall into the
    /// wraparound gap, bracketed by the last anchor and the first anchor of
    /// the next day. A query at a shared second yields the last anchor there.
    #[allow(clippy::cast_precision_loss)]
    pub fn interpolate_at(&self, seconds_into_day: f32, now: Instant) -> Gradient {
        let anchors = self.anchors();
        // Never empty, see `ensure_not_empty`
        let (Some(first), Some(last)) = (anchors.first(), anchors.last()) else {
            unreachable!("schedule table without anchors");
        };
        let min = first.second_of_day as f32;
        let max = last.second_of_day as f32;
        let day = SECONDS_IN_DAY as f32;

        let (lower, upper, ratio) = if seconds_into_day < min || seconds_into_day >= max {
            let gap = min + day - max;
            let elapsed = if seconds_into_day >= max {
                seconds_into_day - max
            } else {
                seconds_into_day + day - max
            };
            (last, first, elapsed / gap)
        } else {
            let below = anchors.partition_point(|a| a.second_of_day as f32 <= seconds_into_day);
            let above = anchors.partition_point(|a| (a.second_of_day as f32) < seconds_into_day);
            let lower = &anchors[below - 1];
            let upper = &anchors[above];
            let span = upper.second_of_day.saturating_sub(lower.second_of_day);
            let ratio = if span == 0 {
                0.0
            } else {
                (seconds_into_day - lower.second_of_day as f32) / span as f32
            };
            (lower, upper, ratio)
        };

        interpolate_gradient(&lower.gradient, &upper.gradient, ratio).with_timestamp(now)
    }
}

fn is_header(line: &str) -> bool {
    line.split(',')
        .next()
        .is_some_and(|field| field.trim().eq_ignore_ascii_case("timeslot"))
}

fn anchor_from_row(row: &ScheduleRow, sun: SunTimes) -> Result<ScheduleAnchor, RowError> {
    let gradient = Gradient::new(
        Instant::from_ticks(0),
        row.color_1,
        row.color_2,
        row.brightness / 100.0,
        row.scroll_speed,
    )
    .map_err(|_| RowError::OutOfRange("brightness"))?;
    Ok(ScheduleAnchor {
        second_of_day: row.timeslot.resolve(sun),
        gradient,
    })
}

/// Capability to evaluate a gradient for an instant
///
/// This is what schedule producers hand to the controller: the controller
/// calls it once per tick and never sees how the value is derived.
pub trait GradientAtTime {
    fn gradient_at(&self, now: Instant) -> Gradient;
}

/// A constant schedule
impl GradientAtTime for Gradient {
    fn gradient_at(&self, now: Instant) -> Gradient {
        self.with_timestamp(now)
    }
}

/// Schedule table bound to the local clock
///
/// Monotonic instants carry no time of day, so the interpolator remembers
/// which second of the day `reference` was and counts from there.
#[derive(Debug, Clone)]
pub struct ScheduleInterpolator {
    table: ScheduleTable,
    reference: Instant,
    reference_micros: u64,
}

impl ScheduleInterpolator {
    /// `reference_second_of_day` is wrapped into one day
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(table: ScheduleTable, reference: Instant, reference_second_of_day: f64) -> Self {
        let micros = if reference_second_of_day.is_finite() && reference_second_of_day > 0.0 {
            (reference_second_of_day * 1_000_000.0) as u64 % DAY_MICROS
        } else {
            0
        };
        Self {
            table,
            reference,
            reference_micros: micros,
        }
    }

    pub fn table(&self) -> &ScheduleTable {
        &self.table
    }

    /// Local second of the day at `at`
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn second_of_day(&self, at: Instant) -> f32 {
        let micros = if at >= self.reference {
            let delta = at.duration_since(self.reference).as_micros() % DAY_MICROS;
            (self.reference_micros + delta) % DAY_MICROS
        } else {
            let delta = self.reference.duration_since(at).as_micros() % DAY_MICROS;
            (self.reference_micros + DAY_MICROS - delta) % DAY_MICROS
        };
        (micros as f64 / 1_000_000.0) as f32
    }
}

impl GradientAtTime for ScheduleInterpolator {
    fn gradient_at(&self, now: Instant) -> Gradient {
        self.table.interpolate_at(self.second_of_day(now), now)
    }
}
