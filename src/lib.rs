//! NVP Gateway Library
//!
//! An async client adapter for the PayPal Classic NVP API and the Payflow Pro
//! gateway. Both speak the same name-value-pair protocol: a form-encoded POST
//! whose response is a URL query string.
//!
//! # Overview
//!
//! The crate is a single round-trip request/response engine:
//!
//! - [`nvp`]: ordered field multimap, request encoder, strict response parser
//! - [`gateway`]: API families, credentials, endpoints, response
//!   classification and configuration
//! - [`transport`]: sealed HTTP transport on reqwest
//! - [`client`]: [`GatewayClient`], which ties the pieces together
//! - [`projection`]: static field tables turning raw responses into
//!   [`NvpValues`](projection::NvpValues) and
//!   [`PayflowValues`](projection::PayflowValues)
//! - [`operations`]: thin builders for individual API operations
//!
//! There are no retries, idempotency keys or persisted state. Every error is
//! returned to the caller unchanged.
//!
//! # Examples
//!
//! ```no_run
//! use nvp_gateway::{
//!     GatewayClient, GatewayError,
//!     gateway::Credentials,
//!     nvp::FieldMultimap,
//!     projection::NvpValues,
//! };
//!
//! # async fn example() -> nvp_gateway::Result<()> {
//! let client = GatewayClient::new(Credentials::signature("user", "pwd", "signature"), true)?;
//!
//! let mut fields = FieldMultimap::new();
//! fields.set("METHOD", "GetExpressCheckoutDetails");
//! fields.set("TOKEN", "EC-7A1");
//!
//! match client.perform_request(fields).await {
//!     Ok(response) => {
//!         let values: NvpValues = response.project();
//!         println!("payer status: {}", values.payment_status);
//!     }
//!     Err(GatewayError::Protocol { error, response }) => {
//!         println!("declined ({error}), correlation id {}", response.correlation_id);
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest and wiremock"
)]

pub mod client;
pub mod error;
pub mod gateway;
pub mod nvp;
pub mod operations;
pub mod projection;
pub mod transport;

pub use client::{ClientBuilder, GatewayClient};
pub use error::{GatewayError, Result};
