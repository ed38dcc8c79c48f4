//! Hijri calendar conversion.
//!
//! Backed by the tabular conversion in `hijri_date`, shifted by a per-user
//! day adjustment for local moon sighting.

use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;
use miqat_types::{Locale, MiqatError};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;

/// Minimum Gregorian year for Hijri conversion.
pub const HIJRI_MIN_YEAR: i32 = 1938;
/// Maximum Gregorian year for Hijri conversion.
pub const HIJRI_MAX_YEAR: i32 = 2076;
/// Adjustment bounds applied to every conversion.
pub const MAX_ADJUSTMENT_DAYS: i64 = 30;

/// A day in the Hijri calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HijriDay {
    pub year: usize,
    pub month: usize,
    pub day: usize,
}

impl HijriDay {
    pub fn month_name(&self, locale: Locale) -> &'static str {
        hijri_month_name(self.month, locale)
    }

    /// "15 Ramadan 1445 AH" or "١٥ رمضان ١٤٤٥ هـ".
    pub fn format(&self, locale: Locale) -> String {
        let suffix = match locale {
            Locale::Arabic => "هـ",
            Locale::Latin => "AH",
        };
        format!(
            "{} {} {} {}",
            locale.localize_digits(&self.day.to_string()),
            self.month_name(locale),
            locale.localize_digits(&self.year.to_string()),
            suffix
        )
    }
}

impl fmt::Display for HijriDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Locale::Latin))
    }
}

fn out_of_range(date: NaiveDate) -> MiqatError {
    MiqatError::DateOutOfRange {
        date,
        min: NaiveDate::from_ymd_opt(HIJRI_MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN),
        max: NaiveDate::from_ymd_opt(HIJRI_MAX_YEAR, 12, 31).unwrap_or(NaiveDate::MAX),
    }
}

// Thread-local cache: (gregorian, adjustment) -> hijri day
thread_local! {
    static HIJRI_CACHE: RefCell<Option<(NaiveDate, i64, HijriDay)>> = const { RefCell::new(None) };
}

/// Converts Gregorian to Hijri with adjustment.
///
/// # Arguments
/// * `date` - Gregorian date
/// * `adjustment` - Day offset for moon sighting (positive = Hijri ahead), clamped to [-30, 30]
///
/// # Errors
/// Returns `DateOutOfRange` if the adjusted date falls outside 1938-2076.
pub fn to_hijri(date: NaiveDate, adjustment: i64) -> Result<HijriDay, MiqatError> {
    let adjustment = adjustment.clamp(-MAX_ADJUSTMENT_DAYS, MAX_ADJUSTMENT_DAYS);

    let cached = HIJRI_CACHE.with(|cache| {
        cache
            .borrow()
            .as_ref()
            .and_then(|(d, adj, h)| (*d == date && *adj == adjustment).then_some(*h))
    });
    if let Some(h) = cached {
        return Ok(h);
    }

    let adjusted = date
        .checked_add_signed(Duration::days(adjustment))
        .ok_or_else(|| out_of_range(date))?;
    if adjusted.year() < HIJRI_MIN_YEAR || adjusted.year() > HIJRI_MAX_YEAR {
        return Err(out_of_range(date));
    }

    let converted = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .map_err(|_| out_of_range(date))?;
    let hijri = HijriDay {
        year: converted.year(),
        month: converted.month(),
        day: converted.day(),
    };

    HIJRI_CACHE.with(|cache| {
        *cache.borrow_mut() = Some((date, adjustment, hijri));
    });

    Ok(hijri)
}

/// Returns the Hijri month name, or "Unknown"/"غير معروف" outside 1..=12.
pub fn hijri_month_name(month: usize, locale: Locale) -> &'static str {
    match locale {
        Locale::Latin => match month {
            1 => "Muharram",
            2 => "Safar",
            3 => "Rabi' al-Awwal",
            4 => "Rabi' al-Thani",
            5 => "Jumada al-Ula",
            6 => "Jumada al-Akhirah",
            7 => "Rajab",
            8 => "Sha'ban",
            9 => "Ramadan",
            10 => "Shawwal",
            11 => "Dhu al-Qi'dah",
            12 => "Dhu al-Hijjah",
            _ => "Unknown",
        },
        Locale::Arabic => match month {
            1 => "محرم",
            2 => "صفر",
            3 => "ربيع الأول",
            4 => "ربيع الآخر",
            5 => "جمادى الأولى",
            6 => "جمادى الآخرة",
            7 => "رجب",
            8 => "شعبان",
            9 => "رمضان",
            10 => "شوال",
            11 => "ذو القعدة",
            12 => "ذو الحجة",
            _ => "غير معروف",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let h1 = to_hijri(date, 0).unwrap();
        let h2 = to_hijri(date, 0).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_adjustment_shifts_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let base = to_hijri(date, 0).unwrap();
        let next = to_hijri(date.succ_opt().unwrap(), 0).unwrap();
        let adjusted = to_hijri(date, 1).unwrap();
        assert_eq!(adjusted, next);
        assert_ne!(adjusted, base);
    }

    #[test]
    fn test_ramadan_1445() {
        // Mid-March 2024 falls in Ramadan 1445.
        let date = NaiveDate::from_ymd_opt(2024, 3, 25).unwrap();
        let h = to_hijri(date, 0).unwrap();
        assert_eq!((h.year, h.month), (1445, 9));
        assert!(h.format(Locale::Latin).contains("Ramadan 1445 AH"));
        assert!(h.format(Locale::Arabic).contains("رمضان ١٤٤٥"));
    }

    #[test]
    fn test_out_of_range_error() {
        let bad_date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let result = to_hijri(bad_date, 0);
        assert!(matches!(result, Err(MiqatError::DateOutOfRange { .. })));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(hijri_month_name(12, Locale::Latin), "Dhu al-Hijjah");
        assert_eq!(hijri_month_name(0, Locale::Latin), "Unknown");
        assert_eq!(hijri_month_name(1, Locale::Arabic), "محرم");
    }
}
