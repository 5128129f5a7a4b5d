//! Gateway family definitions and the response decision logic.
//!
//! The PayPal Classic NVP API and the Payflow gateway share one engine. They
//! differ only in the credential fields they expect, in how a response signals
//! failure, and in their endpoints. Those differences live here:
//!
//! - [`ApiFamily`]: which gateway a client talks to
//! - [`Credentials`]: immutable credential set, which also fixes the family
//! - [`EndpointResolver`]: `(family, sandbox)` to base URL
//! - [`ResponseClassifier`]: per-family success/failure strategy
//! - [`GatewayResponse`]: one parsed exchange
//! - [`GatewayConfig`]: TOML client configuration

pub mod classify;
pub mod config;
pub mod credentials;
pub mod endpoint;
pub mod response;

use serde::{Deserialize, Serialize};

pub use classify::{
    ClassifiedError, NvpClassifier, Outcome, PayflowClassifier, ResponseClassifier,
    SERVICE_UNAVAILABLE_MESSAGE,
};
pub use config::GatewayConfig;
pub use credentials::Credentials;
pub use endpoint::{ConfigurableEndpointResolver, DefaultEndpointResolver, EndpointResolver};
pub use response::GatewayResponse;

/// The NVP gateway family a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiFamily {
    /// PayPal Classic NVP API (`ACK`-based responses).
    Nvp,
    /// Payflow Pro gateway (`RESULT`-based responses).
    Payflow,
}

impl ApiFamily {
    /// Returns the classification strategy for this family.
    #[must_use]
    pub fn classifier(self) -> &'static dyn ResponseClassifier {
        match self {
            Self::Nvp => &NvpClassifier,
            Self::Payflow => &PayflowClassifier,
        }
    }

    /// Returns the request field naming the operation (`METHOD` or `TRXTYPE`).
    #[must_use]
    pub fn operation_key(self) -> &'static str {
        match self {
            Self::Nvp => "METHOD",
            Self::Payflow => "TRXTYPE",
        }
    }

    /// Returns a short name for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nvp => "nvp",
            Self::Payflow => "payflow",
        }
    }
}

impl std::fmt::Display for ApiFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_key() {
        assert_eq!(ApiFamily::Nvp.operation_key(), "METHOD");
        assert_eq!(ApiFamily::Payflow.operation_key(), "TRXTYPE");
    }

    #[test]
    fn test_family_display() {
        assert_eq!(ApiFamily::Nvp.to_string(), "nvp");
        assert_eq!(ApiFamily::Payflow.to_string(), "payflow");
    }

    #[test]
    fn test_family_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            family: ApiFamily,
        }

        let wrapper: Wrapper = toml::from_str("family = \"payflow\"").unwrap();
        assert_eq!(wrapper.family, ApiFamily::Payflow);
    }
}
