use clap::{Args, Parser, Subcommand};
use hazardx_locator::config::Config;
use hazardx_locator::geolocation::{
    abort_pair, DeviceLocator, FixedPositionProvider, GeolocationProvider, IpGeolocationProvider,
    RecommendedAction, UnsupportedProvider,
};
use hazardx_locator::location::{
    catalog, reconcile_address, Coordinates, DistanceMetric, LocationResolver, NominatimGeocoder,
    OfflineGeocoder, ResolveMode, ReverseGeocoder,
};
use hazardx_locator::server;
use hazardx_locator::session::{Role, SessionContext, User};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// HazardX location resolver
///
/// Maps GPS fixes to Sri Lankan districts and divisional secretariats, and
/// division selections back to representative coordinates.
///
/// Examples:
///   hazardx resolve --lat 7.0 --lng 79.94
///   hazardx coords --district Galle --ds Hikkaduwa
///   hazardx divisions Kandy
///   hazardx locate --lat 6.9271 --lng 79.8612
///   hazardx serve --port 8080
#[derive(Parser)]
#[command(name = "hazardx", version, about, long_about = None)]
struct Cli {
    /// Never contact network services.
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a coordinate to a district and divisional secretariat.
    Resolve {
        #[command(flatten)]
        point: Point,
        /// "nearest" or "bbox".
        #[arg(long)]
        mode: Option<ResolveMode>,
        /// "haversine" or "euclidean".
        #[arg(long)]
        metric: Option<DistanceMetric>,
    },
    /// Representative coordinate of a district or divisional secretariat.
    Coords {
        #[arg(long)]
        district: Option<String>,
        #[arg(long)]
        ds: Option<String>,
        /// Require the DS to belong to the district.
        #[arg(long)]
        strict: bool,
    },
    /// List the divisional secretariats of a district.
    Divisions { district: String },
    /// List all districts.
    Districts,
    /// Acquire a position and resolve it; falls back to the given division.
    Locate {
        /// Manual latitude (skips device lookup).
        #[arg(long, allow_hyphen_values = true, requires = "lng")]
        lat: Option<f64>,
        /// Manual longitude.
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lng: Option<f64>,
        #[arg(long)]
        district: Option<String>,
        #[arg(long)]
        ds: Option<String>,
    },
    /// Reverse-geocode a coordinate and match it against the catalog.
    Reverse {
        #[command(flatten)]
        point: Point,
    },
    /// Audit the reference catalogs for gaps and inconsistencies.
    Validate {
        /// Exit non-zero when any gap is found.
        #[arg(long)]
        strict: bool,
    },
    /// Start a session.
    Login(LoginArgs),
    /// End the current session.
    Logout,
    /// Show the current session.
    Whoami,
    /// Serve the JSON API.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args)]
struct Point {
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,
}

#[derive(Args)]
struct LoginArgs {
    #[arg(long)]
    username: String,
    /// Role selected at sign-in: ds, dmc or volunteer.
    #[arg(long)]
    role: Role,
    /// Role held by the account, when it differs from the selection.
    #[arg(long)]
    account_role: Option<Role>,
    #[arg(long, default_value_t = 0)]
    id: u64,
    #[arg(long)]
    district: Option<String>,
    #[arg(long)]
    ds: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    contact_no: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hazardx_locator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| fail(e));
    config.offline |= cli.offline;

    let resolver = LocationResolver::new()
        .with_mode(config.mode)
        .with_metric(config.metric);

    match cli.command {
        Command::Resolve { point, mode, metric } => {
            let resolved = resolver.resolve_with(
                point.lat,
                point.lng,
                mode.unwrap_or(resolver.mode()),
                metric.unwrap_or(resolver.metric()),
            );
            eprintln!("  {}", resolved.display_line());
            print_json(&resolved);
        }

        Command::Coords { district, ds, strict } => {
            let point = match (strict, district.as_deref(), ds.as_deref()) {
                (true, Some(d), Some(s)) => resolver.coordinates_for_division(d, s).ok(),
                _ => resolver.resolve_coordinates_by_division(district.as_deref(), ds.as_deref()),
            };
            let Some(point) = point else {
                fail("Could not find coordinates for the selected district/DS. Please enter them manually.");
            };
            eprintln!("  {}", point);
            print_json(&json!({
                "district": district,
                "divisionalSecretariat": ds,
                "latitude": point.lat,
                "longitude": point.lng,
            }));
        }

        Command::Divisions { district } => {
            let list = resolver.list_divisional_secretariats(&district);
            if list.is_empty() {
                eprintln!("  No divisional secretariats for '{}'", district);
            }
            print_json(&list);
        }

        Command::Districts => {
            print_json(&catalog::districts().collect::<Vec<_>>());
        }

        Command::Locate { lat, lng, district, ds } => {
            let provider: Arc<dyn GeolocationProvider> = match (lat, lng) {
                (Some(lat), Some(lng)) => Arc::new(FixedPositionProvider(Coordinates::new(lat, lng))),
                _ if config.offline => Arc::new(UnsupportedProvider),
                _ => Arc::new(IpGeolocationProvider::new(
                    config.ip_api_url.clone(),
                    config.user_agent.clone(),
                )),
            };
            let locator = DeviceLocator::with_options(provider, config.geolocation_options());

            let (handle, signal) = abort_pair();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    handle.abort();
                }
            });

            match resolver.resolve_current_location(&locator, Some(signal)).await {
                Ok(resolved) => {
                    eprintln!("  {}", resolved.display_line());
                    print_json(&resolved);
                }
                Err(e) => {
                    eprintln!("  Location unavailable: {}", e);
                    match e.recommended_action() {
                        Some(RecommendedAction::SelectManually) => {
                            eprintln!("  Please select your district and divisional secretariat manually.")
                        }
                        Some(RecommendedAction::Retry) => eprintln!("  Please try again."),
                        None => {}
                    }
                    let point = resolver
                        .submission_coordinates(None, district.as_deref(), ds.as_deref())
                        .unwrap_or_else(|e| fail(e));
                    eprintln!("  Using selected division: {}", point);
                    print_json(&json!({
                        "district": district,
                        "divisionalSecretariat": ds,
                        "latitude": point.lat,
                        "longitude": point.lng,
                        "source": "division",
                    }));
                }
            }
        }

        Command::Reverse { point } => {
            let resolved = resolver.resolve_by_coordinates(point.lat, point.lng);
            let geocoder: Box<dyn ReverseGeocoder> = if config.offline {
                Box::new(OfflineGeocoder)
            } else {
                Box::new(NominatimGeocoder::new(
                    config.nominatim_url.clone(),
                    config.user_agent.clone(),
                    config.geo_timeout,
                ))
            };

            let reconciled = match geocoder.reverse(Coordinates::new(point.lat, point.lng)).await {
                Ok(address) => Some(reconcile_address(&address)),
                Err(e) => {
                    warn!(error = %e, "reverse geocoding failed, using catalog only");
                    None
                }
            };

            match reconciled.as_ref().map(|r| (r.district(), r.divisional_secretariat())) {
                Some((Some(d), Some(s))) => eprintln!("  Detected {} DS, {} District", s, d),
                Some((Some(d), None)) => {
                    eprintln!("  Detected {} District; select the divisional secretariat manually", d)
                }
                _ => eprintln!("  Address not recognised; nearest catalog match shown"),
            }
            eprintln!("  {}", resolved.display_line());
            print_json(&json!({ "resolved": resolved, "reconciled": reconciled }));
        }

        Command::Validate { strict } => {
            let report = catalog::audit();
            eprintln!(
                "  {} districts, {} divisional secretariats ({} with coordinates)",
                report.district_count, report.ds_count, report.ds_with_coordinates
            );
            for (district, ds) in &report.ds_missing_coordinates {
                eprintln!("  missing coordinates: {} / {}", district, ds);
            }
            for name in &report.orphan_ds_coordinates {
                eprintln!("  coordinate without district: {}", name);
            }
            for (district, ds) in &report.invalid_zone_tags {
                eprintln!("  zone tag not in catalog: {} / {}", district, ds);
            }
            print_json(&report);
            if strict && !report.is_clean() {
                std::process::exit(1);
            }
        }

        Command::Login(args) => {
            let mut session = load_session(&config);
            let user = User {
                id: args.id,
                username: args.username,
                role: args.account_role.unwrap_or(args.role),
                divisional_secretariat: args.ds,
                district: args.district,
                email: args.email,
                full_name: args.full_name,
                contact_no: args.contact_no,
            };
            let user = session.login(user, args.role).unwrap_or_else(|e| fail(e));
            eprintln!("  Signed in as {} ({})", user.username, user.role);
            print_json(user);
        }

        Command::Logout => {
            let mut session = load_session(&config);
            match session.logout().unwrap_or_else(|e| fail(e)) {
                Some(user) => eprintln!("  Signed out {}", user.username),
                None => eprintln!("  No active session"),
            }
        }

        Command::Whoami => {
            let session = load_session(&config);
            match session.user() {
                Some(user) => {
                    if let Some(home) = user.home_division() {
                        eprintln!("  {} ({}) at {} DS, {} District", user.username, user.role, home.name, home.district);
                    }
                    print_json(user);
                }
                None => fail("Not signed in"),
            }
        }

        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Err(e) = server::start(&config).await {
                fail(format!("Server error on {}: {}", config.bind_addr(), e));
            }
        }
    }
}

fn load_session(config: &Config) -> SessionContext {
    SessionContext::load_from(config.session_path.clone()).unwrap_or_else(|e| fail(e))
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}
