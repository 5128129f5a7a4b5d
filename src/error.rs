//! Error types for the NVP gateway adapter.
//!
//! Every fallible operation in this crate returns [`Result`], whose error type
//! is [`GatewayError`]. Errors are never retried or suppressed internally: they
//! are returned to the immediate caller unchanged.
//!
//! # Error Categories
//!
//! - **Transport errors** ([`GatewayError::Http`]): the HTTP exchange did not
//!   complete, no response is available
//! - **Parse errors** ([`GatewayError::Parse`]): the body was not a valid query string
//! - **Protocol failures** ([`GatewayError::Protocol`]): the gateway answered but
//!   signalled a business failure through `ACK` or `RESULT`
//! - **Input errors** ([`GatewayError::InvalidInput`], [`GatewayError::Config`]):
//!   rejected before anything was sent
//!
//! # Examples
//!
//! ```
//! use nvp_gateway::error::{GatewayError, Result};
//!
//! fn check_note(note: &str) -> Result<()> {
//!     if note.len() > 255 {
//!         return Err(GatewayError::InvalidInput("note is longer than 255 characters".to_owned()));
//!     }
//!     Ok(())
//! }
//! # assert!(check_note("ok").is_ok());
//! ```

use thiserror::Error;

use crate::gateway::{ClassifiedError, GatewayResponse};

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while talking to an NVP or Payflow gateway.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: connection refused, DNS failure, TLS failure,
    /// timeout, or a failure while reading the response body. The caller
    /// receives no response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be decoded as a URL query string.
    #[error("malformed gateway response: {0}")]
    Parse(String),

    /// The gateway answered but reported a failure.
    ///
    /// The parsed response travels with the error so callers can still
    /// inspect or project the partial fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use nvp_gateway::{
    ///     GatewayError,
    ///     gateway::{ApiFamily, GatewayResponse, Outcome},
    ///     nvp::FieldMultimap,
    ///     projection::PayflowValues,
    /// };
    ///
    /// let fields = FieldMultimap::parse(b"RESULT=23&RESPMSG=Invalid+account+number").unwrap();
    /// let response = GatewayResponse::new(ApiFamily::Payflow, fields, 200, true);
    /// let Outcome::Failure(error) = response.classify() else { unreachable!() };
    /// let err = GatewayError::protocol(error, response);
    ///
    /// assert_eq!(err.to_string(), "gateway reported failure: 23: Invalid account number");
    /// let partial: PayflowValues = err.response().unwrap().project();
    /// assert_eq!(partial.result, 23);
    /// ```
    #[error("gateway reported failure: {error}")]
    Protocol {
        /// Classified failure details.
        error: ClassifiedError,
        /// The parsed response that was classified as a failure.
        response: Box<GatewayResponse>,
    },

    /// A request builder rejected its input before sending.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Client configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// Creates a protocol failure carrying its response.
    pub fn protocol(error: ClassifiedError, response: GatewayResponse) -> Self {
        Self::Protocol { error, response: Box::new(response) }
    }

    /// Returns the parsed gateway response for protocol failures.
    #[must_use]
    pub fn response(&self) -> Option<&GatewayResponse> {
        match self {
            Self::Protocol { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns the classified error for protocol failures.
    #[must_use]
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Protocol { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns true if the HTTP exchange itself failed.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
