//! Prayer times, qibla direction and reminder scheduling.
//!
//! The functions at the crate root take an explicit [`Settings`] and validate
//! coordinates according to it before delegating to the calculation crates.

pub mod extension;
pub mod settings;

pub use miqat_astronomy as astronomy;
pub use miqat_calendar as calendar;
pub use miqat_schedule as schedule;
pub use miqat_types as types;

pub use extension::MiqatDateExt;
pub use miqat_astronomy::{
    distance_to_kaaba_km, estimate_current, estimate_for_date, estimate_prayer_times, last_third_of_night,
    qibla_bearing, qibla_direction, CompassPoint, QiblaDirection, KAABA,
};
pub use miqat_calendar::{hijri_month_name, to_hijri, HijriDay};
pub use miqat_schedule::{next_fire_time, next_prayer, preset_options, resolve_notification_time, select_next, NextPrayer};
pub use miqat_types::{
    format_clock_time, parse_clock_display, ClockTime, Coordinate, DaySchedule, Locale, MiqatError, ModelVariant, NightInterval,
    NotificationTimeOption, Period, PrayerName, PrayerTime, RelativeTo,
};
pub use settings::{NotificationPreference, Settings, SettingsBuilder};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod prelude {
    pub use crate::types::*;
    pub use crate::{prayer_times, qibla, today, last_third, notification_plan};
    pub use crate::{MiqatDateExt, Settings, HijriDay, NextPrayer, QiblaDirection};
}

fn checked(coords: Coordinate, settings: &Settings) -> Result<Coordinate, MiqatError> {
    if settings.validate_coordinates {
        coords.validate()
    } else {
        Ok(coords)
    }
}

/// The day's schedule for `date` using the configured model and locale.
///
/// # Errors
/// Returns `InvalidCoordinate` when validation is enabled and `coords` is out of range.
pub fn prayer_times(coords: Coordinate, date: NaiveDate, settings: &Settings) -> Result<DaySchedule, MiqatError> {
    let coords = checked(coords, settings)?;
    Ok(estimate_prayer_times(coords, date, settings.locale, settings.model))
}

/// Today's schedule as the home screen shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Today {
    /// Schedule with the next entry flagged.
    pub schedule: DaySchedule,
    pub next: Option<NextPrayer>,
    /// `None` outside the supported Hijri range.
    pub hijri: Option<HijriDay>,
}

impl Today {
    pub fn hijri_display(&self, locale: Locale) -> Option<String> {
        self.hijri.map(|h| h.format(locale))
    }
}

/// Schedule for `now`'s date with the next prayer flagged and counted down.
///
/// # Errors
/// Returns `InvalidCoordinate` when validation is enabled and `coords` is out of range.
pub fn today(coords: Coordinate, now: NaiveDateTime, settings: &Settings) -> Result<Today, MiqatError> {
    let mut schedule = prayer_times(coords, now.date(), settings)?;
    let next = next_prayer(&mut schedule, now.time());
    let hijri = match to_hijri(now.date(), settings.hijri_adjustment) {
        Ok(h) => Some(h),
        Err(e) => {
            debug!(error = %e, "no Hijri date for today");
            None
        }
    };
    Ok(Today { schedule, next, hijri })
}

/// # Errors
/// Returns `InvalidCoordinate` when validation is enabled and `coords` is out of range.
pub fn qibla(coords: Coordinate, settings: &Settings) -> Result<QiblaDirection, MiqatError> {
    Ok(qibla_direction(checked(coords, settings)?))
}

/// # Errors
/// `InvalidCoordinate`, `DegenerateInterval` or `DateOutOfRange`; see [`last_third_of_night`].
pub fn last_third(coords: Coordinate, date: NaiveDate, settings: &Settings) -> Result<NightInterval, MiqatError> {
    last_third_of_night(checked(coords, settings)?, date)
}

/// Fire instant of `option` on `date`, relative to the schedule of the configured model.
///
/// # Errors
/// `InvalidCoordinate` or `UnresolvableNotificationOption`; see [`resolve_notification_time`].
pub fn notification_time(
    option: &NotificationTimeOption,
    coords: Coordinate,
    date: NaiveDate,
    settings: &Settings,
) -> Result<NaiveDateTime, MiqatError> {
    resolve_notification_time(option, checked(coords, settings)?, date, settings.model)
}

/// A reminder ready to hand to the platform's notification API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledNotification {
    pub id: String,
    pub fire_at: NaiveDateTime,
}

/// A configured reminder that could not be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedNotification {
    pub id: String,
    pub error: MiqatError,
}

/// Outcome of resolving every enabled reminder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationPlan {
    /// Sorted by `fire_at`.
    pub scheduled: Vec<ScheduledNotification>,
    pub rejected: Vec<RejectedNotification>,
}

/// Resolves the next fire instant of every enabled reminder.
///
/// Relative options follow the configured model, so each reminder matches the
/// schedule shown by [`today`]. Options that cannot be resolved land in
/// `rejected`; nothing is scheduled for them.
///
/// # Errors
/// Returns `InvalidCoordinate` when validation is enabled and `coords` is out of range.
pub fn notification_plan(coords: Coordinate, now: NaiveDateTime, settings: &Settings) -> Result<NotificationPlan, MiqatError> {
    let coords = checked(coords, settings)?;
    let mut plan = NotificationPlan::default();

    for option in settings.enabled_notifications() {
        match next_fire_time(option, coords, now, settings.model) {
            Ok(fire_at) => plan.scheduled.push(ScheduledNotification { id: option.id.clone(), fire_at }),
            Err(error) => plan.rejected.push(RejectedNotification { id: option.id.clone(), error }),
        }
    }
    plan.scheduled.sort_by_key(|s| s.fire_at);
    debug!(scheduled = plan.scheduled.len(), rejected = plan.rejected.len(), "notification plan");

    Ok(plan)
}

/// Hijri date of `date` with the configured adjustment.
///
/// # Errors
/// Returns `DateOutOfRange` outside 1938-2076.
pub fn hijri_date(date: NaiveDate, settings: &Settings) -> Result<HijriDay, MiqatError> {
    to_hijri(date, settings.hijri_adjustment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mecca() -> Coordinate {
        astronomy::REFERENCE_POINT
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_invalid_coordinates_rejected_by_default() {
        let bad = Coordinate::new_unchecked(95.0, 0.0);
        let date = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();
        assert!(matches!(
            prayer_times(bad, date, &Settings::default()),
            Err(MiqatError::InvalidCoordinate { .. })
        ));
        assert!(qibla(bad, &Settings::default()).is_err());

        let lenient = Settings::new().validate_coordinates(false);
        assert!(prayer_times(bad, date, &lenient).is_ok());
    }

    #[test]
    fn test_today_flags_next() {
        let settings = Settings::new().locale(Locale::Latin);
        let view = today(mecca(), at(2024, 3, 25, 14, 0), &settings).unwrap();
        let next = view.next.unwrap();
        assert_eq!(next.name, PrayerName::Asr);
        assert_eq!(view.schedule.flagged_next().map(|t| t.name), Some(PrayerName::Asr));
        assert_eq!(view.schedule.iter().filter(|t| t.is_next).count(), 1);
        assert_eq!(view.hijri.map(|h| h.month), Some(9));
    }

    #[test]
    fn test_dated_model_from_settings() {
        let settings = Settings::new().model(ModelVariant::Dated);
        let date = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();
        let day = prayer_times(mecca(), date, &settings).unwrap();
        assert_eq!(day.len(), 6);
        assert_eq!(day.variant, ModelVariant::Dated);
    }

    #[test]
    fn test_notification_plan_reports_rejections() {
        let settings = Settings::new()
            .add_notification(NotificationTimeOption::relative("before_dhuhr_30", PrayerName::Dhuhr, -30))
            .add_notification(NotificationTimeOption::absolute("sleep", ClockTime::saturating(22, 0)))
            .add_notification(NotificationTimeOption { id: "blank".into(), relative_to: None, absolute_time: None });

        let plan = notification_plan(mecca(), at(2024, 3, 21, 12, 0), &settings).unwrap();
        let ids: Vec<&str> = plan.scheduled.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["sleep", "before_dhuhr_30"]);
        assert_eq!(plan.scheduled[0].fire_at, at(2024, 3, 21, 22, 0));
        assert_eq!(plan.scheduled[1].fire_at, at(2024, 3, 22, 11, 35));
        assert_eq!(plan.rejected.len(), 1);
        assert_eq!(plan.rejected[0].error, MiqatError::unresolvable("blank"));
    }

    #[test]
    fn test_reminders_follow_displayed_schedule() {
        let jakarta = Coordinate::new_unchecked(-6.2088, 106.8456);
        let now = at(2024, 3, 21, 8, 0);
        let settings = Settings::new()
            .add_notification(NotificationTimeOption::relative("before_dhuhr_30", PrayerName::Dhuhr, -30))
            .add_notification(NotificationTimeOption::relative("midnight", PrayerName::Midnight, 0));

        let shown = today(jakarta, now, &settings).unwrap().schedule;
        let dhuhr = shown.instant_of(PrayerName::Dhuhr).unwrap();
        let midnight = shown.instant_of(PrayerName::Midnight).unwrap();

        let plan = notification_plan(jakarta, now, &settings).unwrap();
        assert!(plan.rejected.is_empty(), "{:?}", plan.rejected);
        let fire: Vec<NaiveDateTime> = plan.scheduled.iter().map(|s| s.fire_at).collect();
        assert_eq!(fire, vec![dhuhr - chrono::Duration::minutes(30), midnight]);
        assert_eq!(
            notification_time(&settings.notifications[0].option, jakarta, now.date(), &settings).unwrap(),
            at(2024, 3, 21, 12, 4)
        );
    }

    #[test]
    fn test_disabled_notifications_skipped() {
        let mut settings = Settings::new()
            .add_notification(NotificationTimeOption::relative("fajr", PrayerName::Fajr, 0));
        settings.notifications[0].enabled = false;
        let plan = notification_plan(mecca(), at(2024, 3, 21, 0, 0), &settings).unwrap();
        assert!(plan.scheduled.is_empty());
        assert!(plan.rejected.is_empty());
    }

    #[test]
    fn test_hijri_date_with_adjustment() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 25).unwrap();
        let plain = hijri_date(date, &Settings::default()).unwrap();
        let shifted = hijri_date(date, &Settings::new().hijri_adjustment(1)).unwrap();
        assert_eq!(shifted.day, plain.day + 1);
    }
}
