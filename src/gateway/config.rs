//! Client configuration.
//!
//! This module defines the TOML-deserializable configuration for a gateway
//! client. Credentials are deliberately not part of it.

use std::path::Path;

use serde::Deserialize;
use url::{Host, Url};

use crate::{
    error::{GatewayError, Result},
    gateway::ApiFamily,
    transport::HttpConfig,
};

/// Default NVP API version sent with every NVP request.
pub const DEFAULT_NVP_VERSION: &str = "204";

/// Root client configuration.
///
/// # Examples
///
/// ```
/// use nvp_gateway::gateway::{ApiFamily, GatewayConfig};
///
/// let config = GatewayConfig::from_toml(
///     r#"
///     family = "payflow"
///     sandbox = true
///
///     [http]
///     timeout_secs = 20
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.family, ApiFamily::Payflow);
/// assert_eq!(config.http.timeout_secs, 20);
/// assert_eq!(config.nvp_version, "204");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway family.
    pub family: ApiFamily,

    /// Use the sandbox endpoint.
    #[serde(default)]
    pub sandbox: bool,

    /// Fixed endpoint replacing the published one.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// NVP API version (NVP family only).
    #[serde(default = "default_nvp_version")]
    pub nvp_version: String,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl GatewayConfig {
    /// Creates a configuration with defaults for `family`.
    #[must_use]
    pub fn new(family: ApiFamily, sandbox: bool) -> Self {
        Self {
            family,
            sandbox,
            endpoint: None,
            nvp_version: default_nvp_version(),
            http: HttpConfig::default(),
        }
    }

    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if parsing or validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| GatewayError::Config(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the file cannot be read or is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GatewayError::Config(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Validates the configuration.
    ///
    /// Checks that:
    /// - an endpoint override is an absolute URL with a host, using HTTPS
    ///   unless the host is a loopback address
    /// - `nvp_version` is a non-empty string of digits
    /// - HTTP timeouts are within bounds
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if any check fails.
    pub fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            validate_endpoint(endpoint)?;
        }

        if self.nvp_version.is_empty() || !self.nvp_version.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GatewayError::Config(format!(
                "nvp_version must be numeric, got: '{}'",
                self.nvp_version
            )));
        }

        self.http.validate()
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint)
        .map_err(|e| GatewayError::Config(format!("invalid endpoint '{endpoint}': {e}")))?;

    let host = url
        .host()
        .ok_or_else(|| GatewayError::Config(format!("endpoint missing host: {endpoint}")))?;

    let loopback = match host {
        Host::Domain(domain) => domain.eq_ignore_ascii_case("localhost"),
        Host::Ipv4(addr) => addr.is_loopback(),
        Host::Ipv6(addr) => addr.is_loopback(),
    };

    match url.scheme() {
        "https" => Ok(()),
        "http" if loopback => Ok(()),
        scheme => Err(GatewayError::Config(format!(
            "endpoint must use HTTPS, got: {scheme}"
        ))),
    }
}

fn default_nvp_version() -> String {
    DEFAULT_NVP_VERSION.to_owned()
}
