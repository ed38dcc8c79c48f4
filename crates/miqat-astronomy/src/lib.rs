//! Prayer time estimation, qibla bearing and the last third of the night.
//!
//! All functions are pure: they read only their arguments.

pub mod night;
pub mod prayer;
pub mod qibla;

pub use night::last_third_of_night;
pub use prayer::{
    clock_time_for, estimate_current, estimate_for_date, estimate_prayer_times, Anchor, ANCHORS,
    REFERENCE_POINT,
};
pub use qibla::{distance_to_kaaba_km, qibla_bearing, qibla_direction, CompassPoint, QiblaDirection, KAABA};
