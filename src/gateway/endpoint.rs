//! Endpoint resolution.
//!
//! Endpoints are fixed when a client is built and never change per call.

use crate::gateway::ApiFamily;

/// PayPal Classic NVP sandbox endpoint.
pub const NVP_SANDBOX_URL: &str = "https://api-3t.sandbox.paypal.com/nvp";
/// PayPal Classic NVP production endpoint.
pub const NVP_PRODUCTION_URL: &str = "https://api-3t.paypal.com/nvp";
/// Payflow Pro pilot (sandbox) endpoint.
pub const PAYFLOW_SANDBOX_URL: &str = "https://pilot-payflowpro.paypal.com";
/// Payflow Pro production endpoint.
pub const PAYFLOW_PRODUCTION_URL: &str = "https://payflowpro.paypal.com";

/// Maps `(family, sandbox)` to one of the four published endpoints.
#[must_use]
pub const fn published_url(family: ApiFamily, sandbox: bool) -> &'static str {
    match (family, sandbox) {
        (ApiFamily::Nvp, true) => NVP_SANDBOX_URL,
        (ApiFamily::Nvp, false) => NVP_PRODUCTION_URL,
        (ApiFamily::Payflow, true) => PAYFLOW_SANDBOX_URL,
        (ApiFamily::Payflow, false) => PAYFLOW_PRODUCTION_URL,
    }
}

/// Resolves the base URL for an API family.
pub trait EndpointResolver: Send + Sync + std::fmt::Debug {
    /// Returns the base URL requests are posted to.
    fn base_url(&self, family: ApiFamily, sandbox: bool) -> &str;
}

/// Resolver over the four published gateway endpoints.
#[derive(Debug, Clone, Default)]
pub struct DefaultEndpointResolver;

impl DefaultEndpointResolver {
    /// Creates a new default endpoint resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EndpointResolver for DefaultEndpointResolver {
    fn base_url(&self, family: ApiFamily, sandbox: bool) -> &str {
        published_url(family, sandbox)
    }
}

/// Resolver honoring an endpoint override from configuration.
///
/// Falls back to [`DefaultEndpointResolver`] when no override is set.
#[derive(Debug, Clone, Default)]
pub struct ConfigurableEndpointResolver {
    endpoint: Option<String>,
}

impl ConfigurableEndpointResolver {
    /// Creates a resolver with an optional fixed endpoint.
    #[must_use]
    pub fn new(endpoint: Option<String>) -> Self {
        Self { endpoint }
    }

    /// Returns true if an override is configured.
    #[must_use]
    pub fn has_override(&self) -> bool {
        self.endpoint.is_some()
    }
}

impl EndpointResolver for ConfigurableEndpointResolver {
    fn base_url(&self, family: ApiFamily, sandbox: bool) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| published_url(family, sandbox))
    }
}
