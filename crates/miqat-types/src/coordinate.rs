use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MiqatError;

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    /// Returns `InvalidCoordinate` if latitude is outside [-90, 90], longitude
    /// outside [-180, 180], or either value is not finite.
    pub fn new(lat: f64, lng: f64) -> Result<Self, MiqatError> {
        Self::new_unchecked(lat, lng).validate()
    }

    /// Creates a coordinate without range checks.
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true if both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Returns `self` if valid.
    ///
    /// # Errors
    /// Returns `InvalidCoordinate` when [`Coordinate::is_valid`] is false.
    pub fn validate(self) -> Result<Self, MiqatError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(MiqatError::InvalidCoordinate { lat: self.lat, lng: self.lng })
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinate() {
        let c = Coordinate::new(-6.2088, 106.8456).unwrap();
        assert_eq!(c.lat, -6.2088);
        assert_eq!(c.to_string(), "-6.2088°, 106.8456°");
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            Coordinate::new(90.5, 0.0),
            Err(MiqatError::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::new(0.0, -180.1).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_unchecked_accepts_anything() {
        let c = Coordinate::new_unchecked(200.0, 500.0);
        assert!(!c.is_valid());
    }
}
