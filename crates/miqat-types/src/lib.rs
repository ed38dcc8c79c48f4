//! Core types shared by the miqat crates.
//!
//! Coordinates, clock times, prayer schedules, notification options and the
//! bilingual numeral/time formatter. Nothing in here performs I/O or reads the
//! system clock.

pub mod clock;
pub mod coordinate;
pub mod error;
pub mod format;
pub mod locale;
pub mod notification;
pub mod prayer;

pub use clock::ClockTime;
pub use coordinate::Coordinate;
pub use error::MiqatError;
pub use format::{format_clock_time, parse_clock_display, Period};
pub use locale::Locale;
pub use notification::{NightInterval, MAX_OFFSET_MINUTES, NotificationTimeOption, RelativeTo};
pub use prayer::{DaySchedule, ModelVariant, PrayerName, PrayerTime, PrayerTimes};
