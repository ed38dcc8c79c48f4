//! Qibla bearing toward the Kaaba.

use miqat_types::{Coordinate, Locale};
use serde::{Deserialize, Serialize};

/// The Kaaba in Mecca.
pub const KAABA: Coordinate = Coordinate::new_unchecked(21.4225, 39.8262);

/// Mean Earth radius used for distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Initial bearing from `coords` to the Kaaba, in degrees clockwise from
/// true north, normalized to [0, 360).
///
/// Uses the tangent form of the denominator:
/// `atan2(sin Δλ · cos φ₂, cos φ₁ · tan φ₂ − sin φ₁ · cos Δλ)`.
/// Output is NaN only at degenerate points such as the poles.
pub fn qibla_bearing(coords: Coordinate) -> f64 {
    let lat1 = coords.lat.to_radians();
    let lat2 = KAABA.lat.to_radians();
    let d_lng = (KAABA.lng - coords.lng).to_radians();

    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.tan() - lat1.sin() * d_lng.cos();
    let bearing = y.atan2(x).to_degrees();

    (bearing + 360.0) % 360.0
}

/// Great-circle (haversine) distance from `coords` to the Kaaba.
pub fn distance_to_kaaba_km(coords: Coordinate) -> f64 {
    let lat1 = coords.lat.to_radians();
    let lat2 = KAABA.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lng = (KAABA.lng - coords.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Eight-point compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassPoint {
    const ROSE: [CompassPoint; 8] = [
        CompassPoint::North,
        CompassPoint::NorthEast,
        CompassPoint::East,
        CompassPoint::SouthEast,
        CompassPoint::South,
        CompassPoint::SouthWest,
        CompassPoint::West,
        CompassPoint::NorthWest,
    ];

    /// Nearest point for a bearing in degrees; each point covers 45°.
    pub fn from_bearing(bearing: f64) -> Self {
        let normalized = bearing.rem_euclid(360.0);
        let sector = ((normalized + 22.5) / 45.0).floor() as usize % 8;
        Self::ROSE[sector]
    }

    pub const fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Latin => match self {
                CompassPoint::North => "N",
                CompassPoint::NorthEast => "NE",
                CompassPoint::East => "E",
                CompassPoint::SouthEast => "SE",
                CompassPoint::South => "S",
                CompassPoint::SouthWest => "SW",
                CompassPoint::West => "W",
                CompassPoint::NorthWest => "NW",
            },
            Locale::Arabic => match self {
                CompassPoint::North => "شمال",
                CompassPoint::NorthEast => "شمال شرق",
                CompassPoint::East => "شرق",
                CompassPoint::SouthEast => "جنوب شرق",
                CompassPoint::South => "جنوب",
                CompassPoint::SouthWest => "جنوب غرب",
                CompassPoint::West => "غرب",
                CompassPoint::NorthWest => "شمال غرب",
            },
        }
    }
}

/// Everything a compass view needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QiblaDirection {
    /// Degrees clockwise from true north, [0, 360).
    pub bearing: f64,
    pub compass: CompassPoint,
    pub distance_km: f64,
}

pub fn qibla_direction(coords: Coordinate) -> QiblaDirection {
    let bearing = qibla_bearing(coords);
    QiblaDirection {
        bearing,
        compass: CompassPoint::from_bearing(bearing),
        distance_km: distance_to_kaaba_km(coords),
    }
}
