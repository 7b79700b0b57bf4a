//! Location resolver: coordinates → division and division → coordinates.
//!
//! Coordinate flow (bbox):     zones in order → first hit → fallback
//! Coordinate flow (nearest):  exact DS hit → closest DS + closest district → reconcile
//! Name flow:                  DS coordinate → district coordinate → none

use super::catalog::{self, FALLBACK_DISTRICT, FALLBACK_DIVISIONAL_SECRETARIAT, ZONES};
use super::types::{
    Coordinates, DistanceMetric, DivisionalSecretariat, LocationError, LocationSource,
    ResolveMode, ResolvedLocation,
};
use crate::geolocation::{AbortSignal, DeviceLocator, GeolocationError};
use tracing::debug;

/// Tolerance for treating a query as sitting exactly on a catalog point.
const EXACT_HIT_DEG: f64 = 1e-9;

/// Resolves locations against the static catalogs.
///
/// Holds only the default strategy; the catalogs are immutable, so a
/// resolver can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationResolver {
    mode: ResolveMode,
    metric: DistanceMetric,
}

impl LocationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ResolveMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Map a coordinate to a district/DS pair using the configured strategy.
    ///
    /// Never fails: points outside every zone (or non-finite input) yield the
    /// fallback pair. The returned names are always catalog members.
    pub fn resolve_by_coordinates(&self, lat: f64, lng: f64) -> ResolvedLocation {
        self.resolve_with(lat, lng, self.mode, self.metric)
    }

    /// Like [`resolve_by_coordinates`](Self::resolve_by_coordinates) with an
    /// explicit strategy for this call.
    pub fn resolve_with(
        &self,
        lat: f64,
        lng: f64,
        mode: ResolveMode,
        metric: DistanceMetric,
    ) -> ResolvedLocation {
        let point = Coordinates::new(lat, lng);
        if !point.is_finite() {
            debug!(lat, lng, "non-finite coordinates, using fallback");
            return fallback(point);
        }

        match mode {
            ResolveMode::BoundingBox => resolve_bbox(point),
            ResolveMode::NearestNeighbor => resolve_nearest(point, metric),
        }
    }

    /// Representative coordinate for a division selection.
    ///
    /// The DS catalog is consulted first, then the district catalog. Returns
    /// `None` when neither name is known, so callers can fall back to manual
    /// entry.
    pub fn resolve_coordinates_by_division(
        &self,
        district: Option<&str>,
        divisional_secretariat: Option<&str>,
    ) -> Option<Coordinates> {
        let ds = divisional_secretariat.filter(|s| !s.is_empty());
        let district = district.filter(|s| !s.is_empty());

        ds.and_then(catalog::ds_coordinates)
            .or_else(|| district.and_then(catalog::district_coordinates))
    }

    /// Coordinate for a `(district, ds)` pair, checking that the DS belongs to
    /// the district. Falls back to the district's coordinate when the DS has
    /// none.
    pub fn coordinates_for_division(
        &self,
        district: &str,
        divisional_secretariat: &str,
    ) -> Result<Coordinates, LocationError> {
        let ds = catalog::division(district, divisional_secretariat).ok_or_else(|| {
            LocationError::DivisionMismatch {
                district: district.to_string(),
                ds: divisional_secretariat.to_string(),
            }
        })?;

        ds.coordinates
            .or_else(|| catalog::district_coordinates(district))
            .ok_or(LocationError::CoordinatesNotFound)
    }

    /// Divisional secretariats of a district; empty for unknown districts.
    pub fn list_divisional_secretariats(&self, district: &str) -> &'static [&'static str] {
        catalog::divisions_of(district)
    }

    /// Coordinates to attach to a submitted report: the GPS fix when there is
    /// one, otherwise the selected division's representative point.
    pub fn submission_coordinates(
        &self,
        fix: Option<Coordinates>,
        district: Option<&str>,
        divisional_secretariat: Option<&str>,
    ) -> Result<Coordinates, LocationError> {
        if let Some(fix) = fix.filter(Coordinates::is_finite) {
            return Ok(fix);
        }
        self.resolve_coordinates_by_division(district, divisional_secretariat)
            .ok_or(LocationError::CoordinatesNotFound)
    }

    /// Acquire the device position and resolve it to a division.
    pub async fn resolve_current_location(
        &self,
        locator: &DeviceLocator,
        abort: Option<AbortSignal>,
    ) -> Result<ResolvedLocation, GeolocationError> {
        let fix = locator.request_device_location(abort).await?;
        Ok(self.resolve_by_coordinates(fix.coordinates.lat, fix.coordinates.lng))
    }
}

fn fallback(point: Coordinates) -> ResolvedLocation {
    located(FALLBACK_DISTRICT, FALLBACK_DIVISIONAL_SECRETARIAT, point, LocationSource::Fallback)
}

fn located(district: &str, ds: &str, point: Coordinates, source: LocationSource) -> ResolvedLocation {
    let finite = point.is_finite();
    ResolvedLocation {
        district: district.to_string(),
        divisional_secretariat: ds.to_string(),
        latitude: finite.then_some(point.lat),
        longitude: finite.then_some(point.lng),
        source,
    }
}

fn resolve_bbox(point: Coordinates) -> ResolvedLocation {
    match ZONES.iter().find(|z| z.contains(point.lat, point.lng)) {
        Some(zone) => {
            debug!(
                district = zone.district,
                ds = zone.divisional_secretariat,
                province = zone.province,
                "bounding-box hit"
            );
            located(zone.district, zone.divisional_secretariat, point, LocationSource::BoundingBox)
        }
        None => {
            debug!(lat = point.lat, lng = point.lng, "no zone contains point, using fallback");
            fallback(point)
        }
    }
}

/// Divisions that can take part in nearest-neighbor search.
fn located_divisions() -> impl Iterator<Item = (DivisionalSecretariat, Coordinates)> {
    catalog::divisional_secretariats().filter_map(|ds| ds.coordinates.map(|c| (ds, c)))
}

/// First item with the strictly smallest distance, so declaration order
/// breaks ties.
fn closest<T>(items: impl Iterator<Item = (T, Coordinates)>, point: Coordinates, metric: DistanceMetric) -> Option<T> {
    let mut best: Option<(T, f64)> = None;
    for (item, coords) in items {
        let d = metric.distance(point, coords);
        if best.as_ref().map_or(true, |(_, bd)| d < *bd) {
            best = Some((item, d));
        }
    }
    best.map(|(item, _)| item)
}

fn resolve_nearest(point: Coordinates, metric: DistanceMetric) -> ResolvedLocation {
    let source = LocationSource::NearestNeighbor;

    if let Some((ds, _)) = located_divisions().find(|(_, c)| {
        (c.lat - point.lat).abs() < EXACT_HIT_DEG && (c.lng - point.lng).abs() < EXACT_HIT_DEG
    }) {
        debug!(district = ds.district, ds = ds.name, "exact divisional secretariat hit");
        return located(ds.district, ds.name, point, source);
    }

    let nearest_ds = closest(located_divisions(), point, metric);
    let nearest_district = closest(
        catalog::district_entries().map(|d| (d.name, d.coordinates)),
        point,
        metric,
    );

    let (Some(ds), Some(district)) = (nearest_ds, nearest_district) else {
        return fallback(point);
    };

    if ds.district == district {
        return located(district, ds.name, point, source);
    }

    debug!(
        ds = ds.name,
        ds_district = ds.district,
        nearest_district = district,
        %metric,
        "cross-district mismatch, re-resolving within nearest district"
    );

    let within = closest(
        located_divisions().filter(|(d, _)| d.district == district),
        point,
        metric,
    );
    match within {
        Some(inner) => located(district, inner.name, point, source),
        None => {
            // No division of this district has a coordinate.
            let list = catalog::divisions_of(district);
            let name = list
                .iter()
                .find(|n| **n == district)
                .or_else(|| list.first())
                .copied();
            match name {
                Some(name) => located(district, name, point, source),
                None => located(ds.district, ds.name, point, source),
            }
        }
    }
}
