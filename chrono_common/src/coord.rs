//! Receiver coordinates.

use serde::{Deserialize, Serialize};

/// A position in raw receiver units.
///
/// No unit conversion is performed anywhere in the timing path; gate
/// endpoints must be expressed in the same units the receiver reports
/// (for NAV-POSLLH that is degrees scaled by 1e7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude.
    pub lon: i32,
    /// Latitude.
    pub lat: i32,
}

impl Coordinate {
    /// Create a coordinate from raw receiver units.
    #[inline]
    pub const fn new(lon: i32, lat: i32) -> Self {
        Self { lon, lat }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}
