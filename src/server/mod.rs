mod handlers;
mod state;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use crate::config::Config;
use crate::location::{LocationResolver, NominatimGeocoder, OfflineGeocoder, ReverseGeocoder};

pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/resolve", get(handlers::resolve))
        .route("/api/reverse", get(handlers::reverse))
        .route("/api/coordinates", get(handlers::coordinates))
        .route("/api/districts", get(handlers::districts))
        .route("/api/districts/{district}/divisions", get(handlers::divisions))
        .route("/api/zones", get(handlers::zones))
        .route("/api/audit", get(handlers::audit))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Application state derived from configuration.
pub fn state_from_config(config: &Config) -> AppState {
    let geocoder: Arc<dyn ReverseGeocoder> = if config.offline {
        Arc::new(OfflineGeocoder)
    } else {
        Arc::new(NominatimGeocoder::new(
            config.nominatim_url.clone(),
            config.user_agent.clone(),
            config.geo_timeout.max(Duration::from_secs(1)),
        ))
    };

    AppState {
        resolver: LocationResolver::new()
            .with_mode(config.mode)
            .with_metric(config.metric),
        geocoder,
    }
}

pub async fn start(config: &Config) -> std::io::Result<()> {
    let app = build_router(state_from_config(config));
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, mode = %config.mode, metric = %config.metric, "HazardX server listening");
    eprintln!("  HazardX location server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await
}
