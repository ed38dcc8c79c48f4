//! Next-prayer selection and reminder time resolution.

pub mod next;
pub mod notification;

pub use next::{countdown, next_prayer, select_next, NextPrayer};
pub use notification::{next_fire_time, preset_options, resolve_notification_time};
