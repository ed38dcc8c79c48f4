//! Resolving reminder options to absolute instants.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use miqat_astronomy::estimate_prayer_times;
use miqat_types::{ClockTime, Coordinate, Locale, MiqatError, ModelVariant, NotificationTimeOption, PrayerName};
use tracing::{debug, warn};

/// Days either side of `now` searched for the next occurrence. An offset of
/// up to one day, applied to an entry that may itself fall after midnight,
/// moves an occurrence at most two calendar days from its own date.
const SEARCH_DAYS: i64 = 2;

/// Resolves `option` to an instant on `today`.
///
/// A prayer-relative option takes that prayer's instant from the `variant`
/// schedule for `today` and adds the signed offset, so the result may land on
/// the previous or next day. A fixed-time option is placed on `today` as is.
///
/// # Errors
/// Returns `UnresolvableNotificationOption` when neither variant is set, when
/// the offset exceeds one day, or when `variant` does not produce the target
/// entry (Midnight and LastThird on the dated path).
pub fn resolve_notification_time(
    option: &NotificationTimeOption,
    coords: Coordinate,
    today: NaiveDate,
    variant: ModelVariant,
) -> Result<NaiveDateTime, MiqatError> {
    if let Some(rel) = option.relative_to {
        if !rel.is_within_bounds() {
            warn!(id = %option.id, minutes = rel.minutes, "notification offset out of bounds");
            return Err(MiqatError::unresolvable(&option.id));
        }
        let schedule = estimate_prayer_times(coords, today, Locale::default(), variant);
        let Some(prayer_at) = schedule.instant_of(rel.prayer) else {
            warn!(id = %option.id, prayer = %rel.prayer, ?variant, "no time for prayer");
            return Err(MiqatError::unresolvable(&option.id));
        };
        let at = Duration::try_minutes(rel.minutes)
            .and_then(|offset| prayer_at.checked_add_signed(offset))
            .ok_or_else(|| MiqatError::unresolvable(&option.id))?;
        debug!(id = %option.id, %at, "resolved relative notification");
        return Ok(at);
    }

    if let Some(clock) = option.absolute_time {
        return Ok(clock.on(today));
    }

    warn!(id = %option.id, "notification option has no time configured");
    Err(MiqatError::unresolvable(&option.id))
}

/// The first instant at or after `now` at which `option` fires.
///
/// Occurrences anchored on the days around `now` are all considered, so an
/// evening prayer's reminder that spills past midnight is still found the
/// next morning.
///
/// # Errors
/// Propagates [`resolve_notification_time`] errors; `DateOutOfRange` when no
/// occurrence is representable.
pub fn next_fire_time(
    option: &NotificationTimeOption,
    coords: Coordinate,
    now: NaiveDateTime,
    variant: ModelVariant,
) -> Result<NaiveDateTime, MiqatError> {
    let today = now.date();
    let mut earliest: Option<NaiveDateTime> = None;

    for delta in -SEARCH_DAYS..=SEARCH_DAYS {
        let Some(day) = today.checked_add_signed(Duration::days(delta)) else {
            continue;
        };
        let at = resolve_notification_time(option, coords, day, variant)?;
        if at >= now && earliest.is_none_or(|e| at < e) {
            earliest = Some(at);
        }
    }

    earliest.ok_or_else(|| MiqatError::beyond_calendar(today))
}

/// Built-in reminder choices offered by the settings screen.
pub fn preset_options() -> Vec<NotificationTimeOption> {
    vec![
        NotificationTimeOption::relative("before_fajr_15", PrayerName::Fajr, -15),
        NotificationTimeOption::relative("morning_azkar", PrayerName::Fajr, 20),
        NotificationTimeOption::relative("before_dhuhr_30", PrayerName::Dhuhr, -30),
        NotificationTimeOption::relative("evening_azkar", PrayerName::Asr, 20),
        NotificationTimeOption::relative("before_maghrib_15", PrayerName::Maghrib, -15),
        NotificationTimeOption::relative("after_isha_30", PrayerName::Isha, 30),
        NotificationTimeOption::absolute("sleep_azkar", ClockTime::saturating(22, 0)),
    ]
}
