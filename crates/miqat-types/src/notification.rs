use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::MiqatError;
use crate::prayer::PrayerName;

/// Largest reminder offset from a prayer, either way: one day.
pub const MAX_OFFSET_MINUTES: i64 = 24 * 60;

/// A signed minute offset from a named prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeTo {
    pub prayer: PrayerName,
    /// Negative values fire before the prayer.
    pub minutes: i64,
}

impl RelativeTo {
    /// True when `minutes` lies within [`MAX_OFFSET_MINUTES`] either way.
    pub const fn is_within_bounds(&self) -> bool {
        self.minutes >= -MAX_OFFSET_MINUTES && self.minutes <= MAX_OFFSET_MINUTES
    }
}

/// When a reminder should fire on a given day.
///
/// At most one of `relative_to` and `absolute_time` is meaningful;
/// `relative_to` wins when both are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTimeOption {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_to: Option<RelativeTo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_time: Option<ClockTime>,
}

impl NotificationTimeOption {
    pub fn relative(id: impl Into<String>, prayer: PrayerName, minutes: i64) -> Self {
        Self {
            id: id.into(),
            relative_to: Some(RelativeTo { prayer, minutes }),
            absolute_time: None,
        }
    }

    pub fn absolute(id: impl Into<String>, at: ClockTime) -> Self {
        Self {
            id: id.into(),
            relative_to: None,
            absolute_time: Some(at),
        }
    }

    /// Creates a fixed-time option from `HH:MM` text.
    ///
    /// # Errors
    /// Returns `InvalidClockTime` if `at` is not a valid clock time.
    pub fn absolute_str(id: impl Into<String>, at: &str) -> Result<Self, MiqatError> {
        Ok(Self::absolute(id, at.parse()?))
    }

    /// True when neither variant is set.
    pub const fn is_empty(&self) -> bool {
        self.relative_to.is_none() && self.absolute_time.is_none()
    }

    /// Checks that the option can be stored as a user preference.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when neither variant is set or the
    /// prayer offset exceeds one day.
    pub fn validate(&self) -> Result<(), MiqatError> {
        if self.is_empty() {
            return Err(MiqatError::invalid_config(format!(
                "Notification '{}' has neither a prayer offset nor a fixed time",
                self.id
            )));
        }
        if let Some(rel) = self.relative_to.filter(|r| !r.is_within_bounds()) {
            return Err(MiqatError::invalid_config(format!(
                "Notification '{}' offset {} min exceeds {MAX_OFFSET_MINUTES} min",
                self.id, rel.minutes
            )));
        }
        Ok(())
    }
}

/// The last third of one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightInterval {
    /// Maghrib of the evening the night starts.
    pub maghrib: NaiveDateTime,
    /// Start of the last third.
    pub start: NaiveDateTime,
    /// Midpoint of the last third.
    pub middle: NaiveDateTime,
    /// Fajr of the following morning.
    pub fajr: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_json_shape() {
        let opt = NotificationTimeOption::relative("before_dhuhr", PrayerName::Dhuhr, -30);
        let json = serde_json::to_string(&opt).unwrap();
        assert_eq!(
            json,
            r#"{"id":"before_dhuhr","relativeTo":{"prayer":"Dhuhr","minutes":-30}}"#
        );

        let opt: NotificationTimeOption =
            serde_json::from_str(r#"{"id":"sleep","absoluteTime":"22:30"}"#).unwrap();
        assert_eq!(opt.absolute_time, Some(ClockTime::new(22, 30).unwrap()));
        assert!(!opt.is_empty());
    }

    #[test]
    fn test_empty_option() {
        let opt: NotificationTimeOption = serde_json::from_str(r#"{"id":"blank"}"#).unwrap();
        assert!(opt.is_empty());
        assert!(NotificationTimeOption::absolute_str("x", "7am").is_err());
        assert!(matches!(opt.validate(), Err(MiqatError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_offset_bounds() {
        let day_before = NotificationTimeOption::relative("eve", PrayerName::Fajr, -MAX_OFFSET_MINUTES);
        assert!(day_before.validate().is_ok());

        let too_far = NotificationTimeOption::relative("far", PrayerName::Dhuhr, MAX_OFFSET_MINUTES + 1);
        assert!(matches!(too_far.validate(), Err(MiqatError::InvalidConfiguration { .. })));

        let huge = NotificationTimeOption::relative("huge", PrayerName::Dhuhr, 9_000_000_000_000_000);
        assert!(huge.validate().is_err());
        assert!(NotificationTimeOption::absolute_str("sleep", "22:00").unwrap().validate().is_ok());
    }
}
