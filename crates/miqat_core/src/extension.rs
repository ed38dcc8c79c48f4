//! Extension trait for `NaiveDate`.

use chrono::NaiveDate;

use crate::settings::Settings;
use crate::{hijri_date, last_third, prayer_times, HijriDay};
use miqat_types::{Coordinate, DaySchedule, MiqatError, NightInterval};

/// Extends `NaiveDate` with schedule lookups using default settings.
pub trait MiqatDateExt {
    /// Schedule for this date at `coords`.
    fn prayer_times_at(&self, coords: Coordinate) -> Result<DaySchedule, MiqatError>;

    /// Last third of the night starting this evening.
    fn last_third_at(&self, coords: Coordinate) -> Result<NightInterval, MiqatError>;

    /// Hijri date without adjustment.
    fn hijri(&self) -> Result<HijriDay, MiqatError>;
}

impl MiqatDateExt for NaiveDate {
    fn prayer_times_at(&self, coords: Coordinate) -> Result<DaySchedule, MiqatError> {
        prayer_times(coords, *self, &Settings::default())
    }

    fn last_third_at(&self, coords: Coordinate) -> Result<NightInterval, MiqatError> {
        last_third(coords, *self, &Settings::default())
    }

    fn hijri(&self) -> Result<HijriDay, MiqatError> {
        hijri_date(*self, &Settings::default())
    }
}
