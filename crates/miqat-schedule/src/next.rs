use chrono::{Duration, NaiveTime, Timelike};
use miqat_types::{ClockTime, DaySchedule, PrayerName, PrayerTime};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Marks the next entry after `now` and returns its index.
///
/// Entries are scanned in their declared order and compared by
/// [`PrayerTime::ordering_minutes`], so LastThird counts as after every
/// same-day time. When nothing is later than `now` the first entry (tomorrow's
/// Fajr) is chosen. Exactly one entry carries `is_next` afterwards.
/// Returns `None` only for an empty slice.
pub fn select_next(times: &mut [PrayerTime], now: ClockTime) -> Option<usize> {
    if times.is_empty() {
        return None;
    }
    let now_minutes = now.minutes_since_midnight();
    let index = times
        .iter()
        .position(|t| t.ordering_minutes() > now_minutes)
        .unwrap_or(0);
    for (i, t) in times.iter_mut().enumerate() {
        t.is_next = i == index;
    }
    Some(index)
}

/// Time from `now` until the entry at `index`.
///
/// The result lies in (0, 24h]: an entry that is not ahead of `now` is taken
/// to be its next occurrence, and an after-midnight entry counts from today's
/// clock when `now` is itself past midnight.
pub fn countdown(times: &[PrayerTime], index: usize, now: NaiveTime) -> Option<Duration> {
    let target = i64::from(times.get(index)?.ordering_minutes()) * 60;
    let now_secs = i64::from(now.num_seconds_from_midnight());
    let remaining = match (target - now_secs).rem_euclid(SECONDS_PER_DAY) {
        0 => SECONDS_PER_DAY,
        r => r,
    };
    Some(Duration::seconds(remaining))
}

/// The upcoming entry of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPrayer {
    pub index: usize,
    pub name: PrayerName,
    pub clock: ClockTime,
    /// Whole seconds until the entry.
    pub remaining_secs: i64,
}

impl NextPrayer {
    pub fn remaining(&self) -> Duration {
        Duration::seconds(self.remaining_secs)
    }

    /// `H:MM:SS` countdown text.
    pub fn countdown_text(&self) -> String {
        let s = self.remaining_secs.max(0);
        format!("{}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
    }
}

/// Flags the next entry of `schedule` and computes its countdown.
pub fn next_prayer(schedule: &mut DaySchedule, now: NaiveTime) -> Option<NextPrayer> {
    let index = select_next(&mut schedule.times, ClockTime::from(now))?;
    let remaining = countdown(&schedule.times, index, now)?;
    let entry = &schedule.times[index];
    Some(NextPrayer {
        index,
        name: entry.name,
        clock: entry.clock,
        remaining_secs: remaining.num_seconds(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use miqat_astronomy::{estimate_current, REFERENCE_POINT};
    use miqat_types::Locale;

    fn reference_day() -> DaySchedule {
        estimate_current(
            REFERENCE_POINT,
            NaiveDate::from_ymd_opt(2024, 3, 21).unwrap(),
            Locale::Latin,
        )
    }

    fn at(h: u32, m: u32) -> ClockTime {
        ClockTime::new(h, m).unwrap()
    }

    fn flagged(times: &[PrayerTime]) -> Vec<usize> {
        times.iter().enumerate().filter(|(_, t)| t.is_next).map(|(i, _)| i).collect()
    }

    #[test]
    fn test_picks_first_later_entry() {
        let mut day = reference_day();
        assert_eq!(select_next(&mut day.times, at(13, 0)), Some(3)); // Asr
        assert_eq!(flagged(&day.times), vec![3]);

        // Exactly at Dhuhr, Dhuhr has started: Asr is next.
        assert_eq!(select_next(&mut day.times, at(12, 5)), Some(3));
        assert_eq!(select_next(&mut day.times, at(12, 4)), Some(2));
    }

    #[test]
    fn test_early_morning_before_fajr() {
        let mut day = reference_day();
        assert_eq!(select_next(&mut day.times, at(3, 0)), Some(0));
    }

    #[test]
    fn test_last_third_after_midnight_entry() {
        // After Midnight (23:22) the virtual 26:15 LastThird is still ahead.
        let mut day = reference_day();
        assert_eq!(select_next(&mut day.times, at(23, 30)), Some(7));
    }

    #[test]
    fn test_all_passed_falls_back_to_first() {
        let mut day = estimate_current(
            REFERENCE_POINT,
            NaiveDate::from_ymd_opt(2024, 3, 21).unwrap(),
            Locale::Latin,
        );
        // Drop LastThird so every entry is earlier than 23:50.
        day.times.truncate(7);
        assert_eq!(select_next(&mut day.times, at(23, 50)), Some(0));
        assert_eq!(flagged(&day.times), vec![0]);
    }

    #[test]
    fn test_reselect_clears_previous_flag() {
        let mut day = reference_day();
        select_next(&mut day.times, at(5, 0));
        select_next(&mut day.times, at(16, 0));
        assert_eq!(flagged(&day.times), vec![4]);
    }

    #[test]
    fn test_empty_input() {
        let mut empty: Vec<PrayerTime> = Vec::new();
        assert_eq!(select_next(&mut empty, at(12, 0)), None);
    }

    #[test]
    fn test_next_prayer_countdown() {
        let mut day = reference_day();
        let now = NaiveTime::from_hms_opt(11, 30, 30).unwrap();
        let next = next_prayer(&mut day, now).unwrap();
        assert_eq!(next.name, PrayerName::Dhuhr);
        // 12:05:00 - 11:30:30
        assert_eq!(next.remaining_secs, 34 * 60 + 30);
        assert_eq!(next.countdown_text(), "0:34:30");
        assert_eq!(day.flagged_next().map(|t| t.name), Some(PrayerName::Dhuhr));
    }

    #[test]
    fn test_countdown_wraps_to_tomorrow() {
        let mut day = reference_day();
        day.times.truncate(6);
        let now = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
        let next = next_prayer(&mut day, now).unwrap();
        assert_eq!(next.name, PrayerName::Fajr);
        // 22:00 -> 04:11 next day
        assert_eq!(next.remaining(), Duration::minutes(6 * 60 + 11));
    }

    #[test]
    fn test_countdown_to_last_third() {
        let mut day = reference_day();
        let now = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        let next = next_prayer(&mut day, now).unwrap();
        assert_eq!(next.name, PrayerName::LastThird);
        assert_eq!(next.remaining(), Duration::minutes(2 * 60 + 45));
    }

    #[test]
    fn test_countdown_within_a_day() {
        let day = reference_day();
        let last_third = day.len() - 1;
        let after_midnight = NaiveTime::from_hms_opt(0, 30, 0).unwrap();
        assert_eq!(
            countdown(&day.times, last_third, after_midnight),
            Some(Duration::minutes(60 + 45))
        );

        let at_fajr = NaiveTime::from_hms_opt(4, 11, 0).unwrap();
        assert_eq!(countdown(&day.times, 0, at_fajr), Some(Duration::days(1)));
        assert_eq!(countdown(&day.times, 99, at_fajr), None);
    }
}
