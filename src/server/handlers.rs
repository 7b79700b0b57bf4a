use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::location::catalog::{self, CatalogAudit};
use crate::location::{
    reconcile_address, BoundingBoxZone, Coordinates, DistanceMetric, LocationError, Reconciled,
    ResolveMode, ResolvedLocation,
};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

impl From<LocationError> for ApiError {
    fn from(e: LocationError) -> Self {
        let status = match e {
            LocationError::UnknownMode(_) | LocationError::UnknownMetric(_) => StatusCode::BAD_REQUEST,
            LocationError::CoordinatesNotFound => StatusCode::NOT_FOUND,
            LocationError::DivisionMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            LocationError::Network(_) | LocationError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            LocationError::Offline => StatusCode::SERVICE_UNAVAILABLE,
        };
        api_error(status, e.to_string())
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

fn required_point(lat: Option<f64>, lng: Option<f64>) -> Result<(f64, f64), ApiError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok((lat, lng)),
        _ => Err(api_error(StatusCode::BAD_REQUEST, "Missing 'lat' or 'lng' parameter")),
    }
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub mode: Option<String>,
    pub metric: Option<String>,
}

pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<ResolvedLocation>, ApiError> {
    let start = Instant::now();
    let (lat, lng) = required_point(params.lat, params.lng)?;

    let mode = match params.mode.as_deref() {
        Some(m) => m.parse::<ResolveMode>()?,
        None => state.resolver.mode(),
    };
    let metric = match params.metric.as_deref() {
        Some(m) => m.parse::<DistanceMetric>()?,
        None => state.resolver.metric(),
    };

    let resolved = state.resolver.resolve_with(lat, lng, mode, metric);
    debug!(
        lat, lng, %mode, %metric,
        district = %resolved.district,
        ds = %resolved.divisional_secretariat,
        elapsed_us = start.elapsed().as_micros() as u64,
        "/api/resolve"
    );
    Ok(Json(resolved))
}

// ─── GET /api/reverse ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PointQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseResponse {
    /// Catalog answer for the point; always present.
    pub resolved: ResolvedLocation,
    /// Address reconciliation, when the geocoder answered.
    pub reconciled: Option<Reconciled>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub async fn reverse(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PointQuery>,
) -> Result<Json<ReverseResponse>, ApiError> {
    let (lat, lng) = required_point(params.lat, params.lng)?;
    let resolved = state.resolver.resolve_by_coordinates(lat, lng);

    let (reconciled, warning) = match state.geocoder.reverse(Coordinates::new(lat, lng)).await {
        Ok(address) => (Some(reconcile_address(&address)), None),
        Err(e) => {
            warn!(lat, lng, error = %e, "reverse geocoding failed");
            (None, Some(e.to_string()))
        }
    };

    Ok(Json(ReverseResponse {
        resolved,
        reconciled,
        warning,
    }))
}

// ─── GET /api/coordinates ────────────────────────────────────────

#[derive(Deserialize)]
pub struct DivisionQuery {
    pub district: Option<String>,
    pub ds: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatesResponse {
    pub district: Option<String>,
    pub divisional_secretariat: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

pub async fn coordinates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DivisionQuery>,
) -> Result<Json<CoordinatesResponse>, ApiError> {
    let point = state
        .resolver
        .resolve_coordinates_by_division(params.district.as_deref(), params.ds.as_deref())
        .ok_or(LocationError::CoordinatesNotFound)?;

    Ok(Json(CoordinatesResponse {
        district: params.district,
        divisional_secretariat: params.ds,
        latitude: point.lat,
        longitude: point.lng,
    }))
}

// ─── GET /api/districts ──────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictSummary {
    pub name: &'static str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub division_count: usize,
}

pub async fn districts() -> Json<Vec<DistrictSummary>> {
    let list = catalog::districts()
        .map(|name| {
            let point = catalog::district_coordinates(name);
            DistrictSummary {
                name,
                latitude: point.map(|p| p.lat),
                longitude: point.map(|p| p.lng),
                division_count: catalog::divisions_of(name).len(),
            }
        })
        .collect();
    Json(list)
}

// ─── GET /api/districts/{district}/divisions ─────────────────────

#[derive(Serialize)]
pub struct DivisionSummary {
    pub name: &'static str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Serialize)]
pub struct DivisionsResponse {
    pub district: String,
    pub divisions: Vec<DivisionSummary>,
}

pub async fn divisions(
    State(state): State<Arc<AppState>>,
    Path(district): Path<String>,
) -> Json<DivisionsResponse> {
    let divisions = state
        .resolver
        .list_divisional_secretariats(&district)
        .iter()
        .copied()
        .map(|name| {
            let point = catalog::division(&district, name).and_then(|d| d.coordinates);
            DivisionSummary {
                name,
                latitude: point.map(|p| p.lat),
                longitude: point.map(|p| p.lng),
            }
        })
        .collect();

    Json(DivisionsResponse { district, divisions })
}

// ─── GET /api/zones, /api/audit ──────────────────────────────────

pub async fn zones() -> Json<&'static [BoundingBoxZone]> {
    Json(catalog::ZONES)
}

pub async fn audit() -> Json<CatalogAudit> {
    Json(catalog::audit())
}

#[cfg(test)]
mod tests {
    use super::super::build_router;
    use super::*;
    use crate::location::{AddressBreakdown, LocationResolver, OfflineGeocoder, ReverseGeocoder};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    struct CannedGeocoder(AddressBreakdown);

    #[async_trait]
    impl ReverseGeocoder for CannedGeocoder {
        async fn reverse(&self, _: Coordinates) -> Result<AddressBreakdown, LocationError> {
            Ok(self.0.clone())
        }
    }

    fn offline_state() -> AppState {
        AppState {
            resolver: LocationResolver::new(),
            geocoder: Arc::new(OfflineGeocoder),
        }
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
        let response = build_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_resolve_nearest() {
        let (status, body) = get(offline_state(), "/api/resolve?lat=7.4818&lng=80.3609").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["district"], "Kurunegala");
        assert_eq!(body["divisionalSecretariat"], "Kurunegala");
        assert_eq!(body["source"], "nearest_neighbor");
    }

    #[tokio::test]
    async fn test_resolve_bbox_fallback() {
        let (status, body) = get(offline_state(), "/api/resolve?lat=0&lng=0&mode=bbox").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["district"], "Colombo");
        assert_eq!(body["divisionalSecretariat"], "Colombo");
        assert_eq!(body["source"], "fallback");
    }

    #[tokio::test]
    async fn test_resolve_bad_params() {
        let (status, body) = get(offline_state(), "/api/resolve?lat=7.0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);

        let (status, _) = get(offline_state(), "/api/resolve?lat=7&lng=80&metric=manhattan").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_coordinates() {
        let (status, body) = get(offline_state(), "/api/coordinates?district=Galle&ds=Hikkaduwa").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["latitude"], 6.1378);
        assert_eq!(body["longitude"], 80.1031);

        // Unknown DS falls back to the district point.
        let (_, body) = get(offline_state(), "/api/coordinates?district=Kandy&ds=Nowhere").await;
        assert_eq!(body["latitude"], 7.2906);

        let (status, body) = get(offline_state(), "/api/coordinates?district=Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn test_districts_and_divisions() {
        let (_, body) = get(offline_state(), "/api/districts").await;
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 25);
        assert!(list.iter().all(|d| d["latitude"].is_number()));

        let (status, body) = get(offline_state(), "/api/districts/Galle/divisions").await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["divisions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"Hikkaduwa"));

        let (status, body) = get(offline_state(), "/api/districts/Atlantis/divisions").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["divisions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zones_and_audit() {
        let (_, body) = get(offline_state(), "/api/zones").await;
        assert_eq!(body.as_array().unwrap().len(), catalog::ZONES.len());

        let (_, body) = get(offline_state(), "/api/audit").await;
        assert_eq!(body["district_count"], 25);
        assert!(body["invalid_zone_tags"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reverse_offline_still_resolves() {
        let (status, body) = get(offline_state(), "/api/reverse?lat=7.4818&lng=80.3609").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resolved"]["district"], "Kurunegala");
        assert!(body["reconciled"].is_null());
        assert!(body["warning"].is_string());
    }

    #[tokio::test]
    async fn test_reverse_reconciles_address() {
        let state = AppState {
            resolver: LocationResolver::new(),
            geocoder: Arc::new(CannedGeocoder(AddressBreakdown {
                county: Some("Galle District".into()),
                town: Some("Hikkaduwa".into()),
                ..Default::default()
            })),
        };
        let (status, body) = get(state, "/api/reverse?lat=6.1378&lng=80.1031").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reconciled"]["match"], "full");
        assert_eq!(body["reconciled"]["divisionalSecretariat"], "Hikkaduwa");
        assert!(body.get("warning").is_none());
    }
}
