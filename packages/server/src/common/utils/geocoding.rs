use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build from optional query parameters; both halves must be present and in range
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng))
                if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) =>
            {
                Some(Self { lat, lng })
            }
            _ => None,
        }
    }

    /// Vendors that omit coordinates are mapped to (0, 0); such points are not plottable
    pub fn is_unset(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }

    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        calculate_distance_km(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Coarsen coordinates to city-level precision for privacy
///
/// Rounds to 2 decimal places ≈ 1km precision (city area, not exact address)
pub fn coarsen_coords(lat: f64, lng: f64) -> (f64, f64) {
    ((lat * 100.0).round() / 100.0, (lng * 100.0).round() / 100.0)
}

/// Calculate distance between two coordinates in kilometers
///
/// Uses Haversine formula for accuracy on Earth's surface
pub fn calculate_distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
