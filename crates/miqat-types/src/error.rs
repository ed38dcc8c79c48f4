use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from miqat operations.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum MiqatError {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or not finite.
    #[error("Coordinate ({lat}, {lng}) is outside the valid range")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// The night between Maghrib and the next Fajr has no positive length.
    #[error("Night interval from {maghrib} to {fajr} has no positive duration")]
    DegenerateInterval {
        maghrib: NaiveDateTime,
        fajr: NaiveDateTime,
    },

    /// Neither a prayer-relative offset nor a fixed time can be resolved.
    #[error("Notification option '{id}' cannot be resolved to a time")]
    UnresolvableNotificationOption { id: String },

    /// Text that is not a valid `HH:MM` clock time.
    #[error("Invalid clock time: {input}")]
    InvalidClockTime { input: String },

    /// Date outside the supported range.
    #[error("Date {date} is out of supported range ({min} to {max})")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl MiqatError {
    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Creates an `UnresolvableNotificationOption` error.
    pub fn unresolvable(id: impl Into<String>) -> Self {
        Self::UnresolvableNotificationOption { id: id.into() }
    }

    /// Creates an `InvalidClockTime` error.
    pub fn invalid_clock(input: impl Into<String>) -> Self {
        Self::InvalidClockTime { input: input.into() }
    }

    /// Creates a `DateOutOfRange` error for a date at the edge of chrono's calendar.
    pub fn beyond_calendar(date: NaiveDate) -> Self {
        Self::DateOutOfRange {
            date,
            min: NaiveDate::MIN,
            max: NaiveDate::MAX,
        }
    }
}
