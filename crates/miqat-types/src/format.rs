//! Localized 12-hour clock formatting.
//!
//! Output is `"{period} {h12}:{mm}"` in both locales, the period marker first.

use serde::{Deserialize, Serialize};

use crate::error::MiqatError;
use crate::locale::{to_ascii_digits, Locale};

/// Half of the day on a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    /// Hours 0..=11 are AM, 12..=23 are PM.
    pub const fn of_hour(hour: u32) -> Self {
        if hour < 12 { Period::Am } else { Period::Pm }
    }

    pub const fn marker(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Period::Am, Locale::Arabic) => "ص",
            (Period::Pm, Locale::Arabic) => "م",
            (Period::Am, Locale::Latin) => "AM",
            (Period::Pm, Locale::Latin) => "PM",
        }
    }

    fn from_marker(marker: &str, locale: Locale) -> Option<Self> {
        [Period::Am, Period::Pm]
            .into_iter()
            .find(|p| p.marker(locale) == marker)
    }
}

/// Formats a 24-hour clock time for display.
///
/// Hour and minute are trusted to be in range.
pub fn format_clock_time(hour: u32, minute: u32, locale: Locale) -> String {
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    let period = Period::of_hour(hour);
    let time = locale.localize_digits(&format!("{h12}:{minute:02}"));
    format!("{} {}", period.marker(locale), time)
}

/// Parses a string produced by [`format_clock_time`] back into
/// `(h12, minute, period)`.
///
/// # Errors
/// Returns `InvalidClockTime` if the text does not have the formatter's shape.
pub fn parse_clock_display(text: &str, locale: Locale) -> Result<(u32, u32, Period), MiqatError> {
    let (marker, time) = text
        .split_once(' ')
        .ok_or_else(|| MiqatError::invalid_clock(text))?;
    let period = Period::from_marker(marker, locale).ok_or_else(|| MiqatError::invalid_clock(text))?;
    let ascii = to_ascii_digits(time);
    let (h, m) = ascii
        .split_once(':')
        .ok_or_else(|| MiqatError::invalid_clock(text))?;
    let h12: u32 = h.parse().map_err(|_| MiqatError::invalid_clock(text))?;
    let minute: u32 = m.parse().map_err(|_| MiqatError::invalid_clock(text))?;
    if !(1..=12).contains(&h12) || minute > 59 || m.len() != 2 {
        return Err(MiqatError::invalid_clock(text));
    }
    Ok((h12, minute, period))
}
