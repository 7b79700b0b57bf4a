//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lng >= 0.0 { 'E' } else { 'W' };
        write!(f, "{:.4}\u{00B0}{}, {:.4}\u{00B0}{}", self.lat.abs(), ns, self.lng.abs(), ew)
    }
}

/// Top-level administrative division.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct District {
    pub name: &'static str,
    pub coordinates: Coordinates,
}

/// A divisional secretariat, identified by `(district, name)`.
///
/// `coordinates` is `None` where the reference data has no representative
/// point for the division.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DivisionalSecretariat {
    pub district: &'static str,
    pub name: &'static str,
    pub coordinates: Option<Coordinates>,
}

/// Rectangular lat/lng region used for coarse lookup. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBoxZone {
    pub province: &'static str,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
    pub district: &'static str,
    pub divisional_secretariat: &'static str,
}

impl BoundingBoxZone {
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}

/// How a coordinate query was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    BoundingBox,
    NearestNeighbor,
    Fallback,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundingBox => write!(f, "Bounding box"),
            Self::NearestNeighbor => write!(f, "Nearest neighbor"),
            Self::Fallback => write!(f, "Fallback"),
        }
    }
}

/// Result of a coordinate → division query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    pub district: String,
    pub divisional_secretariat: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub source: LocationSource,
}

impl ResolvedLocation {
    pub fn display_line(&self) -> String {
        let coords = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Coordinates::new(lat, lng).to_string(),
            _ => "no coordinates".to_string(),
        };
        format!(
            "{} DS, {} District\n  {} ({})",
            self.divisional_secretariat, self.district, coords, self.source
        )
    }
}

/// Coordinate → division strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMode {
    BoundingBox,
    #[default]
    NearestNeighbor,
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundingBox => write!(f, "bbox"),
            Self::NearestNeighbor => write!(f, "nearest"),
        }
    }
}

impl FromStr for ResolveMode {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bbox" | "bounding-box" | "bounding_box" => Ok(Self::BoundingBox),
            "nearest" | "nearest-neighbor" | "nearest_neighbor" => Ok(Self::NearestNeighbor),
            other => Err(LocationError::UnknownMode(other.to_string())),
        }
    }
}

/// Distance used by nearest-neighbor resolution.
///
/// `Euclidean` works on raw degree differences and can break near-ties
/// differently from `Haversine`, which is why both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Haversine,
    Euclidean,
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Haversine => write!(f, "haversine"),
            Self::Euclidean => write!(f, "euclidean"),
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "haversine" | "km" => Ok(Self::Haversine),
            "euclidean" | "planar" => Ok(Self::Euclidean),
            other => Err(LocationError::UnknownMetric(other.to_string())),
        }
    }
}

/// Location lookup errors.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Unknown resolve mode '{0}'. Use 'bbox' or 'nearest'.")]
    UnknownMode(String),
    #[error("Unknown distance metric '{0}'. Use 'haversine' or 'euclidean'.")]
    UnknownMetric(String),
    #[error("Could not find coordinates for the selected district/DS")]
    CoordinatesNotFound,
    #[error("Divisional secretariat '{ds}' does not belong to district '{district}'")]
    DivisionMismatch { district: String, ds: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
    #[error("Reverse geocoding unavailable in offline mode")]
    Offline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_bounds_inclusive() {
        let zone = BoundingBoxZone {
            province: "Western",
            min_lat: 6.7,
            max_lat: 7.0,
            min_lng: 79.8,
            max_lng: 80.2,
            district: "Colombo",
            divisional_secretariat: "Colombo",
        };
        assert!(zone.contains(6.7, 79.8));
        assert!(zone.contains(7.0, 80.2));
        assert!(!zone.contains(7.0001, 80.0));
        assert!(!zone.contains(6.8, 80.2001));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("bbox".parse::<ResolveMode>().unwrap(), ResolveMode::BoundingBox);
        assert_eq!("Nearest".parse::<ResolveMode>().unwrap(), ResolveMode::NearestNeighbor);
        assert!("grid".parse::<ResolveMode>().is_err());
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("euclidean".parse::<DistanceMetric>().unwrap(), DistanceMetric::Euclidean);
        assert_eq!(DistanceMetric::default(), DistanceMetric::Haversine);
        assert!("manhattan".parse::<DistanceMetric>().is_err());
    }

    #[test]
    fn test_resolved_location_serializes_camel_case() {
        let loc = ResolvedLocation {
            district: "Galle".into(),
            divisional_secretariat: "Hikkaduwa".into(),
            latitude: Some(6.1378),
            longitude: Some(80.1031),
            source: LocationSource::NearestNeighbor,
        };
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["divisionalSecretariat"], "Hikkaduwa");
        assert_eq!(json["source"], "nearest_neighbor");
    }

    #[test]
    fn test_coordinates_display() {
        assert_eq!(Coordinates::new(6.9271, 79.8612).to_string(), "6.9271\u{00B0}N, 79.8612\u{00B0}E");
    }
}
