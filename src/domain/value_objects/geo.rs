//! Geographic coordinates for games and points of interest

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude must be within [-90, 90], longitude within [-180, 180]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Render as extended WKT for the PostGIS geography column.
    /// PostGIS expects longitude first.
    pub fn to_ewkt(&self) -> String {
        format!("SRID=4326;POINT({} {})", self.lng, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ewkt_is_longitude_first() {
        let point = GeoPoint::new(52.52, 13.405);
        assert_eq!(point.to_ewkt(), "SRID=4326;POINT(13.405 52.52)");
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(GeoPoint::new(0.0, 0.0).is_valid());
        assert!(GeoPoint::new(-90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
    }
}
