//! The last third of the night.

use chrono::{Duration, NaiveDate};
use miqat_types::{Coordinate, MiqatError, NightInterval, PrayerName};
use tracing::{debug, warn};

use crate::prayer::clock_time_for;

/// Computes the last third of the night that begins at Maghrib on `today`
/// and ends at Fajr on the following day.
///
/// The night length is measured in whole minutes; `start` is Maghrib plus
/// ⌊2/3⌋ of it and `middle` is Maghrib plus ⌊5/6⌋ of it.
///
/// # Errors
/// - `DegenerateInterval` if the next Fajr is not after today's Maghrib.
/// - `DateOutOfRange` if `today` is the last date chrono can represent.
pub fn last_third_of_night(coords: Coordinate, today: NaiveDate) -> Result<NightInterval, MiqatError> {
    let tomorrow = today
        .succ_opt()
        .ok_or_else(|| MiqatError::beyond_calendar(today))?;

    // The dated path always produces both entries.
    let maghrib_clock = clock_time_for(coords, today, PrayerName::Maghrib)
        .ok_or_else(|| MiqatError::invalid_config("anchor table lacks Maghrib"))?;
    let fajr_clock = clock_time_for(coords, tomorrow, PrayerName::Fajr)
        .ok_or_else(|| MiqatError::invalid_config("anchor table lacks Fajr"))?;

    let maghrib = maghrib_clock.on(today);
    let fajr = fajr_clock.on(tomorrow);

    let night_minutes = (fajr - maghrib).num_minutes();
    if night_minutes <= 0 {
        warn!(%maghrib, %fajr, "night interval is not positive");
        return Err(MiqatError::DegenerateInterval { maghrib, fajr });
    }

    let start = maghrib + Duration::minutes(night_minutes * 2 / 3);
    let middle = maghrib + Duration::minutes(night_minutes * 5 / 6);
    debug!(%start, %middle, night_minutes, "last third of the night");

    Ok(NightInterval { maghrib, start, middle, fajr })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prayer::REFERENCE_POINT;

    #[test]
    fn test_reference_point_spring() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();
        let night = last_third_of_night(REFERENCE_POINT, today).unwrap();

        // Maghrib 18:14, next Fajr 04:21: 607 minutes.
        assert_eq!(night.maghrib.to_string(), "2024-03-21 18:14:00");
        assert_eq!(night.fajr.to_string(), "2024-03-22 04:21:00");
        assert_eq!(night.start.to_string(), "2024-03-22 00:58:00");
        assert_eq!(night.middle.to_string(), "2024-03-22 02:39:00");
    }

    #[test]
    fn test_ordering_holds_across_a_year() {
        let coords = Coordinate::new_unchecked(-33.8688, 151.2093);
        let mut day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        for _ in 0..365 {
            let night = last_third_of_night(coords, day).unwrap();
            assert!(night.maghrib < night.start);
            assert!(night.start < night.middle);
            assert!(night.middle < night.fajr);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_last_representable_date() {
        let result = last_third_of_night(REFERENCE_POINT, NaiveDate::MAX);
        assert!(matches!(result, Err(MiqatError::DateOutOfRange { .. })));
    }
}
