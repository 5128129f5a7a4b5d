//! HTTP exchange with the gateway.
//!
//! Both gateway families use the same exchange: one form-encoded POST whose
//! body is read to the end. The status line is passed through untouched since
//! failures are reported in the body.
//!
//! # Examples
//!
//! ```rust,no_run
//! use nvp_gateway::transport::{FormRequest, HttpTransport, Transport};
//!
//! # async fn example() -> nvp_gateway::error::Result<()> {
//! let transport = HttpTransport::new()?;
//!
//! let request = FormRequest {
//!     url: "https://pilot-payflowpro.paypal.com",
//!     body: "TRXTYPE=I&ORIGID=A10F".to_owned(),
//!     timeout: None,
//! };
//!
//! let response = transport.post_form(request).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::time::Duration;

use crate::error::Result;

pub mod config;
pub mod http;
pub(crate) mod sealed;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// Content type of every request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// One form POST.
#[derive(Debug, Clone)]
pub struct FormRequest<'a> {
    /// Absolute endpoint URL.
    pub url: &'a str,
    /// Encoded `application/x-www-form-urlencoded` body.
    pub body: String,
    /// Deadline for this call, overriding the client-wide timeout.
    pub timeout: Option<Duration>,
}

/// Status and complete body of one exchange.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Complete response body.
    pub body: Vec<u8>,
}

/// Sends form requests to a gateway.
///
/// Sealed: implemented only inside this crate. A call is one awaited
/// exchange; dropping the returned future cancels the request.
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Posts `request.body` and reads the whole response body.
    ///
    /// # Errors
    ///
    /// Returns a transport error on connect, TLS or timeout failures and when
    /// the body cannot be read completely.
    fn post_form<'a>(
        &'a self,
        request: FormRequest<'a>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}
