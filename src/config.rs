use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::geolocation::GeolocationOptions;
use crate::location::providers::{DEFAULT_IP_API_URL, DEFAULT_NOMINATIM_URL, DEFAULT_USER_AGENT};
use crate::location::{DistanceMetric, ResolveMode};
use crate::session::SessionContext;

#[derive(Debug, Error)]
#[error("invalid {key} value '{value}': {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mode: ResolveMode,
    pub metric: DistanceMetric,
    pub geo_timeout: Duration,
    pub geo_max_age: Duration,
    pub nominatim_url: String,
    pub ip_api_url: String,
    pub user_agent: String,
    pub offline: bool,
    pub session_path: PathBuf,
}

impl Config {
    /// Read `.env` (if any) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_ok() {
            info!("Loaded .env");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let session_path = lookup("HAZARDX_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(SessionContext::default_path);

        Ok(Self {
            host: try_load(&lookup, "HAZARDX_HOST", "127.0.0.1")?,
            port: try_load(&lookup, "HAZARDX_PORT", "3000")?,
            mode: try_load(&lookup, "HAZARDX_MODE", "nearest")?,
            metric: try_load(&lookup, "HAZARDX_METRIC", "haversine")?,
            geo_timeout: Duration::from_millis(try_load(&lookup, "HAZARDX_GEO_TIMEOUT_MS", "10000")?),
            geo_max_age: Duration::from_millis(try_load(&lookup, "HAZARDX_GEO_MAX_AGE_MS", "600000")?),
            nominatim_url: try_load(&lookup, "HAZARDX_NOMINATIM_URL", DEFAULT_NOMINATIM_URL)?,
            ip_api_url: try_load(&lookup, "HAZARDX_IP_API_URL", DEFAULT_IP_API_URL)?,
            user_agent: try_load(&lookup, "HAZARDX_USER_AGENT", DEFAULT_USER_AGENT)?,
            offline: parse_flag(&lookup, "HAZARDX_OFFLINE")?,
            session_path,
        })
    }

    pub fn geolocation_options(&self) -> GeolocationOptions {
        GeolocationOptions {
            high_accuracy: true,
            timeout: self.geo_timeout,
            maximum_age: self.geo_max_age,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        debug!("{key} not set, using default: {default}");
        default.to_string()
    });
    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!("Invalid {key} value: {e}");
            Err(ConfigError {
                key,
                value,
                reason: e.to_string(),
            })
        }
    }
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<bool, ConfigError> {
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if ["1", "true", "yes", "on"].iter().any(|t| v.eq_ignore_ascii_case(t)) => Ok(true),
        Some(v) if ["0", "false", "no", "off"].iter().any(|t| v.eq_ignore_ascii_case(t)) => Ok(false),
        Some(v) => Err(ConfigError {
            key,
            value: v.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}
