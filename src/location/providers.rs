//! External location services: Nominatim reverse geocoding and IP geolocation.
//!
//! Both are best-effort network calls. Nothing in the resolver depends on
//! them; callers use them to seed a query and must handle failure.

use super::types::{Coordinates, LocationError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_IP_API_URL: &str = "https://ipapi.co/json/";
pub const DEFAULT_USER_AGENT: &str = "HazardX/0.3 (disaster-response)";

// ─── Reverse geocoding ──────────────────────────────────────────

/// Address breakdown returned by a reverse geocoder.
///
/// Field names follow OpenStreetMap's vocabulary, which does not line up
/// with Sri Lankan administrative names; see [`super::reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressBreakdown {
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub state_district: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub hamlet: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Deserialize)]
struct NominatimReverse {
    #[serde(default)]
    address: Option<AddressBreakdown>,
    #[serde(default)]
    error: Option<String>,
}

/// Coordinate → address lookup.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, point: Coordinates) -> Result<AddressBreakdown, LocationError>;
}

/// OpenStreetMap Nominatim `/reverse` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: user_agent.into(),
            timeout,
        }
    }

    fn reverse_url(&self, point: Coordinates) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}&addressdetails=1",
            self.base_url.trim_end_matches('/'),
            point.lat,
            point.lng
        )
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new(DEFAULT_NOMINATIM_URL, DEFAULT_USER_AGENT, Duration::from_secs(10))
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, point: Coordinates) -> Result<AddressBreakdown, LocationError> {
        let url = self.reverse_url(point);
        let user_agent = self.user_agent.clone();
        let timeout = self.timeout;

        debug!(%url, "nominatim reverse lookup");
        let task = tokio::task::spawn_blocking(move || nominatim_reverse(&url, &user_agent, timeout));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(LocationError::Network(e.to_string())),
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "nominatim reverse lookup timed out");
                Err(LocationError::Network("request timed out".into()))
            }
        }
    }
}

/// Geocoder for offline operation; always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGeocoder;

#[async_trait]
impl ReverseGeocoder for OfflineGeocoder {
    async fn reverse(&self, _: Coordinates) -> Result<AddressBreakdown, LocationError> {
        Err(LocationError::Offline)
    }
}

fn nominatim_reverse(url: &str, user_agent: &str, timeout: Duration) -> Result<AddressBreakdown, LocationError> {
    let response = ureq::get(url)
        .set("User-Agent", user_agent)
        .timeout(timeout)
        .call()
        .map_err(|e| LocationError::Network(e.to_string()))?;

    let body: NominatimReverse = response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    parse_reverse(body)
}

fn parse_reverse(body: NominatimReverse) -> Result<AddressBreakdown, LocationError> {
    if let Some(err) = body.error {
        return Err(LocationError::InvalidResponse(err));
    }
    body.address
        .ok_or_else(|| LocationError::InvalidResponse("no address field".into()))
}

// ─── IP-based geolocation ───────────────────────────────────────

#[derive(Deserialize)]
struct IpApiResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Approximate position from the caller's public IP (blocking).
pub fn ip_geolocate(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Coordinates, LocationError> {
    let response = ureq::get(endpoint)
        .set("User-Agent", user_agent)
        .timeout(timeout)
        .call()
        .map_err(|e| LocationError::Network(e.to_string()))?;

    let r: IpApiResult = response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    let lat = r.latitude.ok_or_else(|| LocationError::InvalidResponse("no latitude".into()))?;
    let lng = r.longitude.ok_or_else(|| LocationError::InvalidResponse("no longitude".into()))?;
    Ok(Coordinates::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_url() {
        let g = NominatimGeocoder::new("https://example.org/", "test", Duration::from_secs(1));
        assert_eq!(
            g.reverse_url(Coordinates::new(6.0535, 80.221)),
            "https://example.org/reverse?format=json&lat=6.0535&lon=80.221&addressdetails=1"
        );
    }

    #[test]
    fn test_parse_reverse_address() {
        let body: NominatimReverse = serde_json::from_str(
            r#"{
                "display_name": "Hikkaduwa, Galle District, Southern Province, Sri Lanka",
                "address": {
                    "town": "Hikkaduwa",
                    "county": "Galle District",
                    "state": "Southern Province",
                    "country": "Sri Lanka"
                }
            }"#,
        )
        .unwrap();
        let addr = parse_reverse(body).unwrap();
        assert_eq!(addr.county.as_deref(), Some("Galle District"));
        assert_eq!(addr.town.as_deref(), Some("Hikkaduwa"));
        assert!(addr.suburb.is_none());
    }

    #[test]
    fn test_parse_reverse_error() {
        let body: NominatimReverse = serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert!(matches!(parse_reverse(body), Err(LocationError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_offline_geocoder() {
        let result = OfflineGeocoder.reverse(Coordinates::new(7.0, 80.0)).await;
        assert!(matches!(result, Err(LocationError::Offline)));
    }
}
