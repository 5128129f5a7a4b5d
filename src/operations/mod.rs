//! Request builders for individual gateway operations.
//!
//! Builders are thin: they turn typed arguments into a [`FieldMultimap`]
//! carrying the `METHOD` or `TRXTYPE` field plus operation fields, and name
//! the typed result the response projects into. They never add credentials
//! and check nothing beyond documented field length limits.
//!
//! ```
//! use nvp_gateway::{
//!     gateway::ApiFamily,
//!     operations::{Operation, nvp::RefundTransaction},
//! };
//! use rust_decimal::Decimal;
//!
//! let refund = RefundTransaction::partial("8RX1", Decimal::new(1250, 2));
//! assert_eq!(RefundTransaction::FAMILY, ApiFamily::Nvp);
//!
//! let fields = refund.into_fields().unwrap();
//! assert_eq!(fields.get("METHOD"), Some("RefundTransaction"));
//! assert_eq!(fields.get("REFUNDTYPE"), Some("PARTIAL"));
//! assert_eq!(fields.get("AMT"), Some("12.50"));
//! ```

pub mod nvp;
pub mod payflow;

use rust_decimal::Decimal;

use crate::{
    error::{GatewayError, Result},
    gateway::ApiFamily,
    nvp::FieldMultimap,
    projection::Projection,
};

/// A single gateway operation.
///
/// Passed to [`GatewayClient::execute`](crate::GatewayClient::execute), which
/// rejects operations whose family does not match the client.
pub trait Operation {
    /// Gateway family the operation belongs to.
    const FAMILY: ApiFamily;

    /// Typed view of the response.
    type Output: Projection;

    /// Builds the request fields.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidInput`] if an argument breaks a field
    /// limit.
    fn into_fields(self) -> Result<FieldMultimap>;
}

/// Formats a currency amount with exactly two decimals.
pub(crate) fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Rejects `value` if it is longer than `max` characters.
pub(crate) fn check_len(name: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(GatewayError::InvalidInput(format!(
            "{name} is longer than {max} characters"
        )));
    }
    Ok(())
}
