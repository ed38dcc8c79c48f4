use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MiqatError;

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time with minute resolution, 24-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    /// Creates a clock time.
    ///
    /// # Errors
    /// Returns `InvalidClockTime` if `hour > 23` or `minute > 59`.
    pub fn new(hour: u32, minute: u32) -> Result<Self, MiqatError> {
        if hour > 23 || minute > 59 {
            return Err(MiqatError::invalid_clock(format!("{hour}:{minute:02}")));
        }
        Ok(Self { hour: hour as u8, minute: minute as u8 })
    }

    /// Builds a clock time, wrapping the hour into a day and clamping the
    /// minute to [0, 59].
    pub const fn saturating(hour: u8, minute: i64) -> Self {
        let minute = if minute < 0 {
            0
        } else if minute > 59 {
            59
        } else {
            minute as u8
        };
        Self { hour: hour % 24, minute }
    }

    pub const fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub const fn minute(&self) -> u32 {
        self.minute as u32
    }

    pub const fn minutes_since_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }

    /// This clock time on `date`.
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.to_naive_time())
    }
}

impl From<NaiveTime> for ClockTime {
    /// Truncates seconds.
    fn from(t: NaiveTime) -> Self {
        Self { hour: t.hour() as u8, minute: t.minute() as u8 }
    }
}

impl FromStr for ClockTime {
    type Err = MiqatError;

    /// Parses `HH:MM` (a single-digit hour is accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (h, m) = trimmed
            .split_once(':')
            .ok_or_else(|| MiqatError::invalid_clock(s))?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(MiqatError::invalid_clock(s));
        }
        let hour: u32 = h.parse().map_err(|_| MiqatError::invalid_clock(s))?;
        let minute: u32 = m.parse().map_err(|_| MiqatError::invalid_clock(s))?;
        Self::new(hour, minute).map_err(|_| MiqatError::invalid_clock(s))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = MiqatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let t: ClockTime = "07:05".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (7, 5));
        assert_eq!(t.to_string(), "07:05");

        let t: ClockTime = "4:11".parse().unwrap();
        assert_eq!(t.minutes_since_midnight(), 4 * 60 + 11);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "7", "24:00", "12:60", "ab:cd", "12:5", "123:00"] {
            assert!(bad.parse::<ClockTime>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_saturating_clamps_minute() {
        assert_eq!(ClockTime::saturating(4, 74).minute(), 59);
        assert_eq!(ClockTime::saturating(18, -1).minute(), 0);
        assert_eq!(ClockTime::saturating(26, 0).hour(), 2);
    }

    #[test]
    fn test_on_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();
        let dt = ClockTime::new(18, 14).unwrap().on(date);
        assert_eq!(dt.to_string(), "2024-03-21 18:14:00");
    }

    #[test]
    fn test_serde_as_string() {
        let t = ClockTime::new(21, 0).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"21:00\"");
        let back: ClockTime = serde_json::from_str("\"21:00\"").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<ClockTime>("\"25:00\"").is_err());
    }
}
