//! Payflow Pro transactions.
//!
//! Every transaction sets `TRXTYPE`. Card transactions use the credit card
//! tender (`TENDER=C`); follow-up transactions reference the original `PNREF`
//! through `ORIGID`.

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};

use super::{Operation, format_amount};
use crate::{
    error::Result,
    gateway::ApiFamily,
    nvp::FieldMultimap,
    projection::{PayflowValues, Verbosity},
};

/// A card charged by [`Sale`] or [`Authorization`].
///
/// The card number is kept out of `Debug` output.
#[derive(Debug)]
pub struct CreditCard {
    pan: SecretString,
    expiration: String,
}

impl CreditCard {
    /// Creates a card from its number and `MMYY` expiration date.
    #[must_use]
    pub fn new(pan: impl Into<String>, expiration: impl Into<String>) -> Self {
        Self { pan: SecretString::from(pan.into()), expiration: expiration.into() }
    }
}

fn transaction(trxtype: &str, verbosity: Verbosity) -> FieldMultimap {
    let mut fields = FieldMultimap::new();
    fields.set("TRXTYPE", trxtype);
    if verbosity == Verbosity::High {
        fields.set("VERBOSITY", verbosity.as_str());
    }
    fields
}

fn card_transaction(
    trxtype: &str,
    card: &CreditCard,
    amount: Decimal,
    verbosity: Verbosity,
) -> FieldMultimap {
    let mut fields = transaction(trxtype, verbosity);
    fields.set("TENDER", "C");
    fields.set("ACCT", card.pan.expose_secret());
    fields.set("AMT", format_amount(amount));
    fields.set("EXPDATE", card.expiration.as_str());
    fields
}

fn reference_transaction(
    trxtype: &str,
    original_id: String,
    amount: Option<Decimal>,
    verbosity: Verbosity,
) -> FieldMultimap {
    let mut fields = transaction(trxtype, verbosity);
    fields.set("ORIGID", original_id);
    if let Some(amount) = amount {
        fields.set("AMT", format_amount(amount));
    }
    fields
}

/// Sale (`TRXTYPE=S`): authorizes and captures in one step.
#[derive(Debug)]
pub struct Sale {
    card: CreditCard,
    amount: Decimal,
    verbosity: Verbosity,
}

impl Sale {
    /// Charges `amount` to `card`.
    #[must_use]
    pub fn new(card: CreditCard, amount: Decimal) -> Self {
        Self { card, amount, verbosity: Verbosity::Standard }
    }

    /// Requests the given response detail level.
    #[must_use]
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

impl Operation for Sale {
    const FAMILY: ApiFamily = ApiFamily::Payflow;
    type Output = PayflowValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        Ok(card_transaction("S", &self.card, self.amount, self.verbosity))
    }
}

/// Authorization (`TRXTYPE=A`): reserves funds for a later
/// [`DelayedCapture`].
#[derive(Debug)]
pub struct Authorization {
    card: CreditCard,
    amount: Decimal,
    verbosity: Verbosity,
}

impl Authorization {
    /// Authorizes `amount` on `card`.
    #[must_use]
    pub fn new(card: CreditCard, amount: Decimal) -> Self {
        Self { card, amount, verbosity: Verbosity::Standard }
    }

    /// Requests the given response detail level.
    #[must_use]
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

impl Operation for Authorization {
    const FAMILY: ApiFamily = ApiFamily::Payflow;
    type Output = PayflowValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        Ok(card_transaction("A", &self.card, self.amount, self.verbosity))
    }
}

/// Delayed capture (`TRXTYPE=D`) of an authorization.
#[derive(Debug, Clone)]
pub struct DelayedCapture {
    original_id: String,
    amount: Option<Decimal>,
}

impl DelayedCapture {
    /// Captures the full authorized amount.
    #[must_use]
    pub fn new(original_id: impl Into<String>) -> Self {
        Self { original_id: original_id.into(), amount: None }
    }

    /// Captures `amount` instead of the authorized amount.
    #[must_use]
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }
}

impl Operation for DelayedCapture {
    const FAMILY: ApiFamily = ApiFamily::Payflow;
    type Output = PayflowValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        Ok(reference_transaction("D", self.original_id, self.amount, Verbosity::Standard))
    }
}

/// Void (`TRXTYPE=V`) of an unsettled transaction.
#[derive(Debug, Clone)]
pub struct Void {
    /// `PNREF` of the transaction to void.
    pub original_id: String,
}

impl Operation for Void {
    const FAMILY: ApiFamily = ApiFamily::Payflow;
    type Output = PayflowValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        Ok(reference_transaction("V", self.original_id, None, Verbosity::Standard))
    }
}

/// Credit (`TRXTYPE=C`): refunds a settled transaction.
#[derive(Debug, Clone)]
pub struct Credit {
    original_id: String,
    amount: Option<Decimal>,
}

impl Credit {
    /// Refunds the full original amount.
    #[must_use]
    pub fn new(original_id: impl Into<String>) -> Self {
        Self { original_id: original_id.into(), amount: None }
    }

    /// Refunds only `amount`.
    #[must_use]
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }
}

impl Operation for Credit {
    const FAMILY: ApiFamily = ApiFamily::Payflow;
    type Output = PayflowValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        Ok(reference_transaction("C", self.original_id, self.amount, Verbosity::Standard))
    }
}

/// Inquiry (`TRXTYPE=I`) into the state of an earlier transaction.
///
/// Inquiry responses carry `TRANSSTATE` and `DATE_TO_SETTLE`.
#[derive(Debug, Clone)]
pub struct Inquiry {
    original_id: String,
    verbosity: Verbosity,
}

impl Inquiry {
    /// Looks up the transaction with `PNREF` `original_id`.
    #[must_use]
    pub fn new(original_id: impl Into<String>) -> Self {
        Self { original_id: original_id.into(), verbosity: Verbosity::Standard }
    }

    /// Requests the given response detail level.
    #[must_use]
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

impl Operation for Inquiry {
    const FAMILY: ApiFamily = ApiFamily::Payflow;
    type Output = PayflowValues;

    fn into_fields(self) -> Result<FieldMultimap> {
        Ok(reference_transaction("I", self.original_id, None, self.verbosity))
    }
}
