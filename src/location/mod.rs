//! Location subsystem for HazardX.
//!
//! Maps GPS coordinates to Sri Lankan districts and divisional
//! secretariats, and division selections back to representative
//! coordinates, using only the built-in catalogs. Network providers and
//! address reconciliation sit alongside but are never required.

pub mod catalog;
pub mod distance;
pub mod providers;
pub mod reconcile;
pub mod resolver;
pub mod types;

pub use catalog::{CatalogAudit, FALLBACK_DISTRICT, FALLBACK_DIVISIONAL_SECRETARIAT};
pub use providers::{AddressBreakdown, NominatimGeocoder, OfflineGeocoder, ReverseGeocoder};
pub use reconcile::{reconcile_address, Reconciled};
pub use resolver::LocationResolver;
pub use types::{
    BoundingBoxZone, Coordinates, DistanceMetric, District, DivisionalSecretariat, LocationError,
    LocationSource, ResolveMode, ResolvedLocation,
};
