//! Periodic schedule refresh.
//!
//! Rebuilds the schedule interpolator from the schedule file and today's
//! sun times, then hands it to the controller. A failed cycle is logged
//! and the controller keeps its previous schedule.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use lighthaus_composer::{
    ControlMessage, ControlSender, Instant, ScheduleInterpolator, ScheduleTable, SunTimesLookup,
};
use tracing::{debug, warn};

use crate::clock::WallClock;
use crate::error::RefreshError;

pub struct ScheduleRefresher<L: SunTimesLookup> {
    schedule_file: PathBuf,
    lookup: L,
    clock: WallClock,
}

impl<L: SunTimesLookup> ScheduleRefresher<L> {
    pub const fn new(schedule_file: PathBuf, lookup: L, clock: WallClock) -> Self {
        Self {
            schedule_file,
            lookup,
            clock,
        }
    }

    /// Build an interpolator for the current day
    pub fn build(&mut self) -> Result<ScheduleInterpolator, RefreshError> {
        let text = fs::read_to_string(&self.schedule_file)?;
        let sun = self.lookup.sun_times()?;
        let table = ScheduleTable::parse(&text, sun)?;

        let reference = Instant::now();
        let second_of_day = self.clock.second_of_day();
        Ok(ScheduleInterpolator::new(table, reference, second_of_day))
    }

    /// Build and send one interpolator
    pub fn refresh<const SIZE: usize>(
        &mut self,
        sender: &ControlSender<'_, ScheduleInterpolator, SIZE>,
    ) -> Result<(), RefreshError> {
        let interpolator = self.build()?;
        let anchors = interpolator.table().anchors().len();
        sender
            .try_send(ControlMessage::ScheduleUpdated(interpolator))
            .map_err(|_| RefreshError::InboxFull)?;
        debug!(anchors, "schedule refreshed");
        Ok(())
    }

    /// Refresh forever, every `interval`
    pub fn run<const SIZE: usize>(
        mut self,
        sender: ControlSender<'static, ScheduleInterpolator, SIZE>,
        interval: Duration,
    ) {
        loop {
            if let Err(error) = self.refresh(&sender) {
                warn!(%error, file = %self.schedule_file.display(), "schedule refresh failed, keeping previous schedule");
            }
            thread::sleep(interval);
        }
    }
}
