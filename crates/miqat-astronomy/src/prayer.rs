//! Prayer Time Estimation Module.
//!
//! Estimates a day's prayer times by shifting a fixed table of anchor times by
//! the observer's distance from a reference point. This is an offset model,
//! not a solar-angle calculation: the anchors and moduli are tuning constants
//! and [`ANCHORS`] is the single place to replace them.

use chrono::{Datelike, NaiveDate};
use miqat_types::{ClockTime, Coordinate, DaySchedule, Locale, ModelVariant, PrayerName, PrayerTime, PrayerTimes};
use std::f64::consts::TAU;
use tracing::debug;

/// Point the offset model measures distance from.
pub const REFERENCE_POINT: Coordinate = Coordinate::new_unchecked(21.3891, 39.8579);

/// Offset minutes per degree of latitude difference.
const LAT_MINUTES_PER_DEGREE: f64 = 0.016 * 60.0;
/// Offset minutes per degree of longitude difference.
const LNG_MINUTES_PER_DEGREE: f64 = 0.008 * 60.0;
/// Peak of the seasonal term, in minutes.
const SEASONAL_AMPLITUDE: f64 = 10.0;
/// The dated offset wraps into [0, 30).
const DATED_OFFSET_WRAP: i64 = 30;

/// Tuning for the date-parameterized path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatedTuning {
    pub modulus: i64,
    /// Multiplies `day mod 2`: +1, -1, or 0 for no parity shift.
    pub parity_sign: i64,
}

/// One row of the anchor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub name: PrayerName,
    pub hour: u8,
    pub minute: u8,
    /// Modulus applied to the offset on the current path.
    pub current_modulus: i64,
    /// `None` for entries the dated path does not produce.
    pub dated: Option<DatedTuning>,
}

const fn anchor(name: PrayerName, hour: u8, minute: u8, current_modulus: i64, dated: Option<(i64, i64)>) -> Anchor {
    Anchor {
        name,
        hour,
        minute,
        current_modulus,
        dated: match dated {
            Some((modulus, parity_sign)) => Some(DatedTuning { modulus, parity_sign }),
            None => None,
        },
    }
}

/// Anchor times in [`PrayerName::ALL`] order.
pub const ANCHORS: [Anchor; 8] = [
    anchor(PrayerName::Fajr, 4, 11, 60, Some((15, 1))),
    anchor(PrayerName::Sunrise, 5, 40, 60, Some((15, 0))),
    anchor(PrayerName::Dhuhr, 12, 5, 30, Some((10, 0))),
    anchor(PrayerName::Asr, 15, 30, 30, Some((10, 1))),
    anchor(PrayerName::Maghrib, 18, 15, 30, Some((5, -1))),
    anchor(PrayerName::Isha, 19, 45, 30, Some((10, -1))),
    anchor(PrayerName::Midnight, 23, 22, 30, None),
    // Clock time on the following day.
    anchor(PrayerName::LastThird, 2, 15, 30, None),
];

/// Rounds half up, matching the rounding the offsets were tuned with.
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

fn distance_minutes(coords: Coordinate) -> f64 {
    (coords.lat - REFERENCE_POINT.lat).abs() * LAT_MINUTES_PER_DEGREE
        + (coords.lng - REFERENCE_POINT.lng).abs() * LNG_MINUTES_PER_DEGREE
}

fn seasonal_minutes(date: NaiveDate) -> f64 {
    (f64::from(date.ordinal()) / 365.0 * TAU).sin() * SEASONAL_AMPLITUDE
}

/// Offset in minutes on the current path. Never negative.
pub fn current_offset(coords: Coordinate) -> i64 {
    round_half_up(distance_minutes(coords))
}

/// Offset in minutes on the dated path, in [0, 30).
pub fn dated_offset(coords: Coordinate, date: NaiveDate) -> i64 {
    round_half_up(distance_minutes(coords) + seasonal_minutes(date)).rem_euclid(DATED_OFFSET_WRAP)
}

fn dated_clock(anchor: &Anchor, tuning: DatedTuning, offset: i64, date: NaiveDate) -> ClockTime {
    let parity = i64::from(date.day() % 2);
    let minute = i64::from(anchor.minute) + offset % tuning.modulus + tuning.parity_sign * parity;
    ClockTime::saturating(anchor.hour, minute)
}

/// Estimates all eight entries from location alone.
///
/// `date` only labels the schedule; the clock times do not depend on it.
pub fn estimate_current(coords: Coordinate, date: NaiveDate, locale: Locale) -> DaySchedule {
    let offset = current_offset(coords);
    debug!(lat = coords.lat, lng = coords.lng, offset, "current prayer offset");

    let times: PrayerTimes = ANCHORS
        .iter()
        .map(|a| {
            let minute = i64::from(a.minute) + offset % a.current_modulus;
            PrayerTime::new(a.name, ClockTime::saturating(a.hour, minute), locale)
        })
        .collect();

    DaySchedule { date, locale, variant: ModelVariant::Current, times }
}

/// Estimates Fajr through Isha for `date`, with the seasonal term and day parity.
pub fn estimate_for_date(coords: Coordinate, date: NaiveDate, locale: Locale) -> DaySchedule {
    let offset = dated_offset(coords, date);
    debug!(lat = coords.lat, lng = coords.lng, %date, offset, "dated prayer offset");

    let times: PrayerTimes = ANCHORS
        .iter()
        .filter_map(|a| {
            a.dated
                .map(|tuning| PrayerTime::new(a.name, dated_clock(a, tuning, offset, date), locale))
        })
        .collect();

    DaySchedule { date, locale, variant: ModelVariant::Dated, times }
}

/// Estimates a day's schedule with the chosen model.
///
/// Deterministic: identical arguments always give identical output.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use miqat_astronomy::{estimate_prayer_times, REFERENCE_POINT};
/// use miqat_types::{Locale, ModelVariant, PrayerName};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();
/// let day = estimate_prayer_times(REFERENCE_POINT, date, Locale::Latin, ModelVariant::Current);
/// assert_eq!(day.get(PrayerName::Fajr).unwrap().display, "AM 4:11");
/// ```
pub fn estimate_prayer_times(coords: Coordinate, date: NaiveDate, locale: Locale, variant: ModelVariant) -> DaySchedule {
    match variant {
        ModelVariant::Current => estimate_current(coords, date, locale),
        ModelVariant::Dated => estimate_for_date(coords, date, locale),
    }
}

/// Dated-path clock time of a single entry, without building a schedule.
///
/// Returns `None` for Midnight and LastThird, which the dated path does not produce.
pub fn clock_time_for(coords: Coordinate, date: NaiveDate, name: PrayerName) -> Option<ClockTime> {
    let anchor = ANCHORS.iter().find(|a| a.name == name)?;
    let tuning = anchor.dated?;
    Some(dated_clock(anchor, tuning, dated_offset(coords, date), date))
}
