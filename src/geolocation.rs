//! Device position acquisition.
//!
//! A [`DeviceLocator`] wraps a platform [`GeolocationProvider`] and gives each
//! request a bounded timeout, an acceptable cached-fix age and an optional
//! [`AbortSignal`]. Every request settles exactly once.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::location::providers;
use crate::location::Coordinates;

/// Request parameters handed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// A previous fix younger than this is returned without polling.
    pub maximum_age: Duration,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(10 * 60),
        }
    }
}

/// A position reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionFix {
    pub coordinates: Coordinates,
    pub accuracy_m: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl PositionFix {
    pub fn now(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            accuracy_m: None,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location access denied by user")]
    PermissionDenied,
    #[error("Location information unavailable")]
    PositionUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Geolocation is not supported on this device")]
    Unsupported,
    #[error("Location request was cancelled")]
    Aborted,
}

/// What the user should be offered after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    SelectManually,
    Retry,
}

impl GeolocationError {
    pub fn recommended_action(&self) -> Option<RecommendedAction> {
        match self {
            Self::PermissionDenied | Self::Unsupported => Some(RecommendedAction::SelectManually),
            Self::PositionUnavailable | Self::Timeout => Some(RecommendedAction::Retry),
            Self::Aborted => None,
        }
    }
}

/// Source of raw position fixes.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(
        &self,
        options: &GeolocationOptions,
    ) -> Result<PositionFix, GeolocationError>;
}

// ─── Cancellation ───────────────────────────────────────────────

/// Cancels the requests holding the paired [`AbortSignal`].
#[derive(Debug)]
pub struct AbortHandle(watch::Sender<bool>);

#[derive(Debug, Clone)]
pub struct AbortSignal(watch::Receiver<bool>);

pub fn abort_pair() -> (AbortHandle, AbortSignal) {
    let (tx, rx) = watch::channel(false);
    (AbortHandle(tx), AbortSignal(rx))
}

impl AbortHandle {
    pub fn abort(&self) {
        self.0.send_replace(true);
    }
}

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once aborted. Never resolves if the handle is dropped first.
    async fn aborted(mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

// ─── Locator ────────────────────────────────────────────────────

pub struct DeviceLocator {
    provider: Arc<dyn GeolocationProvider>,
    options: GeolocationOptions,
    last_fix: Mutex<Option<PositionFix>>,
}

impl DeviceLocator {
    pub fn new(provider: Arc<dyn GeolocationProvider>) -> Self {
        Self::with_options(provider, GeolocationOptions::default())
    }

    pub fn with_options(provider: Arc<dyn GeolocationProvider>, options: GeolocationOptions) -> Self {
        Self {
            provider,
            options,
            last_fix: Mutex::new(None),
        }
    }

    pub fn options(&self) -> &GeolocationOptions {
        &self.options
    }

    /// Acquire the current position.
    ///
    /// Returns a cached fix when one is younger than `maximum_age`, otherwise
    /// polls the provider for at most `timeout`.
    pub async fn request_device_location(
        &self,
        abort: Option<AbortSignal>,
    ) -> Result<PositionFix, GeolocationError> {
        if abort.as_ref().is_some_and(AbortSignal::is_aborted) {
            return Err(GeolocationError::Aborted);
        }

        if let Some(fix) = self.cached_fix() {
            debug!(age_ms = (Utc::now() - fix.timestamp).num_milliseconds(), "using cached fix");
            return Ok(fix);
        }

        let request = tokio::time::timeout(
            self.options.timeout,
            self.provider.current_position(&self.options),
        );

        let outcome = match abort {
            Some(signal) => tokio::select! {
                outcome = request => outcome,
                _ = signal.aborted() => {
                    debug!("location request aborted");
                    return Err(GeolocationError::Aborted);
                }
            },
            None => request.await,
        };

        let fix = match outcome {
            Ok(Ok(fix)) => fix,
            Ok(Err(e)) => {
                warn!(error = %e, "geolocation provider failed");
                return Err(e);
            }
            Err(_) => {
                warn!(timeout_ms = self.options.timeout.as_millis() as u64, "geolocation timed out");
                return Err(GeolocationError::Timeout);
            }
        };

        *self.last_fix.lock().unwrap_or_else(|e| e.into_inner()) = Some(fix);
        Ok(fix)
    }

    fn cached_fix(&self) -> Option<PositionFix> {
        let max_age = chrono::Duration::from_std(self.options.maximum_age).ok()?;
        let last = *self.last_fix.lock().unwrap_or_else(|e| e.into_inner());
        last.filter(|fix| Utc::now() - fix.timestamp <= max_age)
    }
}

// ─── Providers ──────────────────────────────────────────────────

/// Always reports the same position (manual entry, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedPositionProvider(pub Coordinates);

#[async_trait]
impl GeolocationProvider for FixedPositionProvider {
    async fn current_position(&self, _: &GeolocationOptions) -> Result<PositionFix, GeolocationError> {
        if !self.0.is_finite() {
            return Err(GeolocationError::PositionUnavailable);
        }
        Ok(PositionFix::now(self.0))
    }
}

/// A runtime with no geolocation capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedProvider;

#[async_trait]
impl GeolocationProvider for UnsupportedProvider {
    async fn current_position(&self, _: &GeolocationOptions) -> Result<PositionFix, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Network-derived position via an IP geolocation service.
///
/// IP lookups are city-level at best, so `high_accuracy` cannot be honoured;
/// the reported accuracy reflects that.
#[derive(Debug, Clone)]
pub struct IpGeolocationProvider {
    endpoint: String,
    user_agent: String,
}

impl IpGeolocationProvider {
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl GeolocationProvider for IpGeolocationProvider {
    async fn current_position(
        &self,
        options: &GeolocationOptions,
    ) -> Result<PositionFix, GeolocationError> {
        let endpoint = self.endpoint.clone();
        let user_agent = self.user_agent.clone();
        let timeout = options.timeout;

        let result = tokio::task::spawn_blocking(move || {
            providers::ip_geolocate(&endpoint, &user_agent, timeout)
        })
        .await
        .map_err(|_| GeolocationError::PositionUnavailable)?;

        match result {
            Ok(coordinates) => Ok(PositionFix {
                coordinates,
                accuracy_m: Some(5_000.0),
                timestamp: Utc::now(),
            }),
            Err(e) => {
                warn!(error = %e, "IP geolocation failed");
                Err(GeolocationError::PositionUnavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        fix_age: chrono::Duration,
    }

    impl CountingProvider {
        fn new(fix_age: chrono::Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fix_age,
            })
        }
    }

    #[async_trait]
    impl GeolocationProvider for CountingProvider {
        async fn current_position(&self, _: &GeolocationOptions) -> Result<PositionFix, GeolocationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PositionFix {
                coordinates: Coordinates::new(6.9271, 79.8612),
                accuracy_m: Some(10.0),
                timestamp: Utc::now() - self.fix_age,
            })
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl GeolocationProvider for SlowProvider {
        async fn current_position(&self, _: &GeolocationOptions) -> Result<PositionFix, GeolocationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(PositionFix::now(Coordinates::new(7.0, 80.0)))
        }
    }

    struct DeniedProvider;

    #[async_trait]
    impl GeolocationProvider for DeniedProvider {
        async fn current_position(&self, _: &GeolocationOptions) -> Result<PositionFix, GeolocationError> {
            Err(GeolocationError::PermissionDenied)
        }
    }

    #[test]
    fn test_default_options() {
        let opts = GeolocationOptions::default();
        assert!(opts.high_accuracy);
        assert_eq!(opts.timeout, Duration::from_secs(10));
        assert_eq!(opts.maximum_age, Duration::from_secs(600));
    }

    #[test]
    fn test_recommended_actions_are_distinct() {
        assert_eq!(
            GeolocationError::PermissionDenied.recommended_action(),
            Some(RecommendedAction::SelectManually)
        );
        assert_eq!(GeolocationError::Timeout.recommended_action(), Some(RecommendedAction::Retry));
        assert_eq!(
            GeolocationError::PositionUnavailable.recommended_action(),
            Some(RecommendedAction::Retry)
        );
        assert_eq!(
            GeolocationError::Unsupported.recommended_action(),
            Some(RecommendedAction::SelectManually)
        );
        assert_eq!(GeolocationError::Aborted.recommended_action(), None);
    }

    #[tokio::test]
    async fn test_fixed_provider() {
        let locator = DeviceLocator::new(Arc::new(FixedPositionProvider(Coordinates::new(6.1378, 80.1031))));
        let fix = locator.request_device_location(None).await.unwrap();
        assert_eq!(fix.coordinates, Coordinates::new(6.1378, 80.1031));
    }

    #[tokio::test]
    async fn test_unsupported() {
        let locator = DeviceLocator::new(Arc::new(UnsupportedProvider));
        assert_eq!(
            locator.request_device_location(None).await,
            Err(GeolocationError::Unsupported)
        );
    }

    #[tokio::test]
    async fn test_permission_denied_is_surfaced() {
        let locator = DeviceLocator::new(Arc::new(DeniedProvider));
        assert_eq!(
            locator.request_device_location(None).await,
            Err(GeolocationError::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn test_fresh_fix_is_reused() {
        let provider = CountingProvider::new(chrono::Duration::zero());
        let locator = DeviceLocator::new(provider.clone());
        locator.request_device_location(None).await.unwrap();
        locator.request_device_location(None).await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_fix_is_refreshed() {
        let provider = CountingProvider::new(chrono::Duration::minutes(20));
        let locator = DeviceLocator::new(provider.clone());
        locator.request_device_location(None).await.unwrap();
        locator.request_device_location(None).await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let locator = DeviceLocator::new(Arc::new(SlowProvider));
        assert_eq!(
            locator.request_device_location(None).await,
            Err(GeolocationError::Timeout)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_in_flight() {
        let locator = Arc::new(DeviceLocator::new(Arc::new(SlowProvider)));
        let (handle, signal) = abort_pair();

        let task = {
            let locator = locator.clone();
            tokio::spawn(async move { locator.request_device_location(Some(signal)).await })
        };
        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.abort();

        assert_eq!(task.await.unwrap(), Err(GeolocationError::Aborted));
    }

    #[tokio::test]
    async fn test_already_aborted() {
        let provider = CountingProvider::new(chrono::Duration::zero());
        let locator = DeviceLocator::new(provider.clone());
        let (handle, signal) = abort_pair();
        handle.abort();
        assert_eq!(
            locator.request_device_location(Some(signal)).await,
            Err(GeolocationError::Aborted)
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_does_not_abort() {
        let locator = DeviceLocator::with_options(
            Arc::new(FixedPositionProvider(Coordinates::new(7.0, 80.0))),
            GeolocationOptions::default(),
        );
        let (handle, signal) = abort_pair();
        drop(handle);
        assert!(locator.request_device_location(Some(signal)).await.is_ok());
    }
}
