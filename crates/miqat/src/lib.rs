//! # Miqat
//!
//! Prayer times, qibla direction, the last third of the night and reminder
//! scheduling for Islamic reference apps.
//!
//! This crate is a facade that re-exports functionality from the `miqat` crates.
//!
//! ## Modules
//!
//! - `types`: Core types (Coordinate, PrayerTime, Locale, etc.)
//! - `calendar`: Hijri calendar conversion
//! - `astronomy`: Prayer time estimation, qibla bearing, night intervals
//! - `schedule`: Next-prayer selection and reminder resolution
//!
//! ## Usage
//!
//! ```rust
//! use miqat::prelude::*;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();
//! let mecca = Coordinate::new(21.3891, 39.8579).unwrap();
//! let settings = Settings::new().locale(Locale::Latin);
//!
//! let day = prayer_times(mecca, date, &settings).unwrap();
//! assert_eq!(day.get(PrayerName::Fajr).unwrap().display, "AM 4:11");
//! ```

pub use miqat_core::*;
