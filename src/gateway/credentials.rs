//! Gateway credentials.
//!
//! Credentials are captured once when a client is built and cannot be read back
//! or changed afterwards. Secrets are held in [`SecretString`], so `Debug`
//! output never contains them.

use secrecy::{ExposeSecret, SecretString};

use crate::{gateway::ApiFamily, nvp::FieldMultimap};

/// Family-specific part of the credential set.
#[derive(Debug)]
enum Secret {
    /// API signature (NVP family).
    Signature(SecretString),
    /// Partner and vendor pair (Payflow family).
    PartnerVendor {
        partner: String,
        vendor: SecretString,
    },
}

/// Username, password, and family-specific secret.
///
/// # Examples
///
/// ```
/// use nvp_gateway::gateway::{ApiFamily, Credentials};
///
/// let creds = Credentials::signature("api_user", "api_pwd", "api_signature");
/// assert_eq!(creds.family(), ApiFamily::Nvp);
/// assert!(!format!("{creds:?}").contains("api_pwd"));
///
/// let creds = Credentials::payflow("user", "pwd", "PayPal", "vendor");
/// assert_eq!(creds.family(), ApiFamily::Payflow);
/// ```
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password: SecretString,
    secret: Secret,
}

impl Credentials {
    /// Creates signature credentials for the PayPal Classic NVP API.
    #[must_use]
    pub fn signature(
        username: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            secret: Secret::Signature(SecretString::from(signature.into())),
        }
    }

    /// Creates partner/vendor credentials for the Payflow gateway.
    ///
    /// Sandbox accounts usually use the same value for vendor and username.
    #[must_use]
    pub fn payflow(
        username: impl Into<String>,
        password: impl Into<String>,
        partner: impl Into<String>,
        vendor: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            secret: Secret::PartnerVendor {
                partner: partner.into(),
                vendor: SecretString::from(vendor.into()),
            },
        }
    }

    /// Returns the API family these credentials belong to.
    #[must_use]
    pub fn family(&self) -> ApiFamily {
        match self.secret {
            Secret::Signature(_) => ApiFamily::Nvp,
            Secret::PartnerVendor { .. } => ApiFamily::Payflow,
        }
    }

    /// Writes the credential fields into `fields`, replacing any caller values.
    ///
    /// `nvp_version` is only sent by the NVP family.
    pub(crate) fn inject(&self, fields: &mut FieldMultimap, nvp_version: &str) {
        fields.set("USER", self.username.as_str());
        fields.set("PWD", self.password.expose_secret());
        match &self.secret {
            Secret::Signature(signature) => {
                fields.set("SIGNATURE", signature.expose_secret());
                fields.set("VERSION", nvp_version);
            }
            Secret::PartnerVendor { partner, vendor } => {
                fields.set("PARTNER", partner.as_str());
                fields.set("VENDOR", vendor.expose_secret());
            }
        }
    }
}
