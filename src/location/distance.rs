//! Distance metrics used by nearest-neighbor resolution.

use super::types::{Coordinates, DistanceMetric};
use std::f64::consts::PI;

const EARTH_RADIUS_KM: f64 = 6371.0;
const DEG: f64 = PI / 180.0;

/// Great-circle distance in kilometres.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat * DEG;
    let lat2 = b.lat * DEG;
    let dlat = (b.lat - a.lat) * DEG;
    let dlng = (b.lng - a.lng) * DEG;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Planar distance on raw degree differences.
pub fn euclidean_deg(a: Coordinates, b: Coordinates) -> f64 {
    (a.lat - b.lat).hypot(a.lng - b.lng)
}

impl DistanceMetric {
    /// Distance between two points in this metric's unit (km or degrees).
    pub fn distance(self, a: Coordinates, b: Coordinates) -> f64 {
        match self {
            Self::Haversine => haversine_km(a, b),
            Self::Euclidean => euclidean_deg(a, b),
        }
    }
}
