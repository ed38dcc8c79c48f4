use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::clock::{ClockTime, MINUTES_PER_DAY};
use crate::error::MiqatError;
use crate::format::format_clock_time;
use crate::locale::Locale;

/// The named times of one day, in their fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrayerName {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    /// Midpoint of the night.
    Midnight,
    /// Start of the last third of the night. Falls after midnight.
    LastThird,
}

impl PrayerName {
    pub const ALL: [PrayerName; 8] = [
        PrayerName::Fajr,
        PrayerName::Sunrise,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
        PrayerName::Midnight,
        PrayerName::LastThird,
    ];

    /// The five obligatory prayers (Sunrise and the night markers are not).
    pub const fn is_obligatory(&self) -> bool {
        matches!(
            self,
            PrayerName::Fajr | PrayerName::Dhuhr | PrayerName::Asr | PrayerName::Maghrib | PrayerName::Isha
        )
    }

    /// True when the clock time belongs to the following calendar day.
    pub const fn falls_after_midnight(&self) -> bool {
        matches!(self, PrayerName::LastThird)
    }

    pub const fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Arabic => match self {
                PrayerName::Fajr => "الفجر",
                PrayerName::Sunrise => "الشروق",
                PrayerName::Dhuhr => "الظهر",
                PrayerName::Asr => "العصر",
                PrayerName::Maghrib => "المغرب",
                PrayerName::Isha => "العشاء",
                PrayerName::Midnight => "منتصف الليل",
                PrayerName::LastThird => "الثلث الأخير",
            },
            Locale::Latin => match self {
                PrayerName::Fajr => "Fajr",
                PrayerName::Sunrise => "Sunrise",
                PrayerName::Dhuhr => "Dhuhr",
                PrayerName::Asr => "Asr",
                PrayerName::Maghrib => "Maghrib",
                PrayerName::Isha => "Isha",
                PrayerName::Midnight => "Midnight",
                PrayerName::LastThird => "Last Third",
            },
        }
    }
}

impl fmt::Display for PrayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Locale::Latin))
    }
}

impl FromStr for PrayerName {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        PrayerName::ALL
            .into_iter()
            .find(|p| {
                p.label(Locale::Latin)
                    .chars()
                    .filter(|c| c.is_ascii_alphabetic())
                    .map(|c| c.to_ascii_lowercase())
                    .eq(wanted.chars())
            })
            .ok_or_else(|| MiqatError::invalid_config(format!("Unknown prayer '{s}'")))
    }
}

/// Which estimation path produced a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelVariant {
    /// Location-only offsets; all eight entries, Midnight and LastThird included.
    #[default]
    Current,
    /// Adds a seasonal term and day parity; Fajr through Isha only.
    Dated,
}

/// One entry of a day's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTime {
    pub name: PrayerName,
    pub clock: ClockTime,
    /// Set by the next-prayer selector; recomputed on every evaluation.
    pub is_next: bool,
    /// `clock` formatted for the schedule's locale.
    pub display: String,
}

impl PrayerTime {
    pub fn new(name: PrayerName, clock: ClockTime, locale: Locale) -> Self {
        Self {
            name,
            clock,
            is_next: false,
            display: format_clock_time(clock.hour(), clock.minute(), locale),
        }
    }

    /// Minutes since midnight used for ordering against "now": entries that
    /// fall after midnight are pushed a full day ahead.
    pub const fn ordering_minutes(&self) -> u32 {
        let m = self.clock.minutes_since_midnight();
        if self.name.falls_after_midnight() { m + MINUTES_PER_DAY } else { m }
    }
}

pub type PrayerTimes = SmallVec<[PrayerTime; 8]>;

/// A day's schedule in the fixed [`PrayerName::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub locale: Locale,
    pub variant: ModelVariant,
    pub times: PrayerTimes,
}

impl DaySchedule {
    pub fn get(&self, name: PrayerName) -> Option<&PrayerTime> {
        self.times.iter().find(|t| t.name == name)
    }

    pub fn clock_of(&self, name: PrayerName) -> Option<ClockTime> {
        self.get(name).map(|t| t.clock)
    }

    /// The absolute instant of `name`, on the following day for entries after midnight.
    pub fn instant_of(&self, name: PrayerName) -> Option<NaiveDateTime> {
        let clock = self.clock_of(name)?;
        let date = if name.falls_after_midnight() {
            self.date.succ_opt()?
        } else {
            self.date
        };
        Some(clock.on(date))
    }

    /// The entry currently flagged as next, if the selector has run.
    pub fn flagged_next(&self) -> Option<&PrayerTime> {
        self.times.iter().find(|t| t.is_next)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrayerTime> {
        self.times.iter()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_minutes_last_third() {
        let lt = PrayerTime::new(PrayerName::LastThird, ClockTime::saturating(2, 15), Locale::Latin);
        let isha = PrayerTime::new(PrayerName::Isha, ClockTime::saturating(19, 45), Locale::Latin);
        assert_eq!(lt.ordering_minutes(), 1440 + 135);
        assert!(lt.ordering_minutes() > isha.ordering_minutes());
    }

    #[test]
    fn test_labels() {
        assert_eq!(PrayerName::Dhuhr.label(Locale::Arabic), "الظهر");
        assert_eq!(PrayerName::LastThird.to_string(), "Last Third");
        assert!(!PrayerName::Sunrise.is_obligatory());
    }

    #[test]
    fn test_parse_prayer_name() {
        assert_eq!("dhuhr".parse::<PrayerName>().unwrap(), PrayerName::Dhuhr);
        assert_eq!("last_third".parse::<PrayerName>().unwrap(), PrayerName::LastThird);
        assert_eq!("LastThird".parse::<PrayerName>().unwrap(), PrayerName::LastThird);
        assert!("zuhr".parse::<PrayerName>().is_err());
    }

    #[test]
    fn test_instant_of_after_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();
        let mut times = PrayerTimes::new();
        times.push(PrayerTime::new(PrayerName::LastThird, ClockTime::saturating(2, 15), Locale::Latin));
        let schedule = DaySchedule { date, locale: Locale::Latin, variant: ModelVariant::Current, times };
        assert_eq!(
            schedule.instant_of(PrayerName::LastThird).unwrap().to_string(),
            "2024-03-22 02:15:00"
        );
        assert!(schedule.instant_of(PrayerName::Fajr).is_none());
    }
}
