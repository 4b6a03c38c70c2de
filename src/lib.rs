pub mod config;
pub mod entitlement;
pub mod observability;
pub mod processing;

use std::sync::Arc;

use config::CoreConfig;
use entitlement::catalog::FeatureCatalog;
use entitlement::{AccessDecision, SubscriptionTier};
use processing::capability::{LocalCapability, LocalModelHost, PlatformBackend, RemoteCapability};
use processing::router::Router;
use processing::{ProcessingRequest, ProcessingResult};

/// Shared core state handed to the surrounding application.
///
/// The host asks [`CoreContext::check_access`] before rendering or launching
/// a feature, and calls [`CoreContext::process`] for the tool invocations the
/// entitlement check has already allowed.
#[derive(Clone)]
pub struct CoreContext {
    pub config: Arc<CoreConfig>,
    /// Feature catalog, built once at startup and read-only afterwards.
    pub catalog: Arc<FeatureCatalog>,
    /// Strategy router over the injected processing capabilities.
    pub router: Arc<Router>,
}

impl CoreContext {
    /// Build a context with the default in-process capabilities
    /// (local model host + platform backend).
    pub fn new(config: CoreConfig) -> Self {
        let local = Arc::new(LocalModelHost::new(config.models.table.clone()));
        let remote = Arc::new(PlatformBackend::new());
        Self::with_capabilities(config, local, remote)
    }

    /// Build a context with host-injected capabilities. Used by hosts that
    /// bring their own model runtime or remote API client, and by tests.
    pub fn with_capabilities(
        config: CoreConfig,
        local: Arc<dyn LocalCapability>,
        remote: Arc<dyn RemoteCapability>,
    ) -> Self {
        let catalog = Arc::new(config.build_catalog());
        Self {
            config: Arc::new(config),
            catalog,
            router: Arc::new(Router::new(local, remote)),
        }
    }

    /// Evaluate access to the catalog feature `feature_id` for `tier`.
    ///
    /// Returns `None` when the id is not in the catalog — an unknown feature
    /// cannot be granted.
    pub fn check_access(&self, tier: SubscriptionTier, feature_id: &str) -> Option<AccessDecision> {
        self.catalog
            .get(feature_id)
            .map(|descriptor| entitlement::check_access(tier, descriptor))
    }

    /// Execute a processing request. Entitlement must already have been
    /// checked by the caller; this never re-verifies it.
    pub async fn process(&self, request: &ProcessingRequest) -> ProcessingResult {
        self.router.process(request).await
    }
}
