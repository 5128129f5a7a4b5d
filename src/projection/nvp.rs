//! Typed result for PayPal Classic NVP responses.

use serde::Serialize;

use super::{FieldRule, Projection};

/// Common fields of an NVP API response.
///
/// Every field defaults to empty when the gateway did not return its key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NvpValues {
    /// `ACK`
    pub ack: String,
    /// `AMT`
    pub amount: String,
    /// `AUTHORIZATIONID`
    pub authorization_id: String,
    /// `BILLINGAGREEMENTID`
    pub billing_agreement_id: String,
    /// `BUILD`
    pub build: String,
    /// `CORRELATIONID`
    pub correlation_id: String,
    /// `CURRENCYCODE`
    pub currency_code: String,
    /// `L_ERRORCODE0`
    pub error_code: String,
    /// `L_SHORTMESSAGE0`
    pub error_message: String,
    /// `L_LONGMESSAGE0`
    pub error_message_extended: String,
    /// `L_SEVERITYCODE0`
    pub severity_code: String,
    /// `ORDERTIME`
    pub date_ordered: String,
    /// `PAYMENTSTATUS`
    pub payment_status: String,
    /// `PAYMENTTYPE`
    pub payment_type: String,
    /// `PENDINGREASON`
    pub pending_reason: String,
    /// `PROTECTIONELIGIBILITY`
    pub protection_eligibility: String,
    /// `PROTECTIONELIGIBILITYTYPE`
    pub protection_eligibility_type: String,
    /// `REASONCODE`
    pub reason_code: String,
    /// `TAXAMT`
    pub taxed_amount: String,
    /// `TIMESTAMP`
    pub timestamp: String,
    /// `TOKEN`, returned by `SetExpressCheckout`.
    pub token: String,
    /// `TRANSACTIONID`
    pub transaction_id: String,
    /// `TRANSACTIONTYPE`
    pub transaction_type: String,
    /// `VERSION`
    pub version: String,
    /// `PROFILEID`, returned by recurring payments operations.
    pub profile_id: String,
    /// `PROFILESTATUS`
    pub profile_status: String,
}

type Rule = FieldRule<NvpValues>;

static NVP_RULES: [Rule; 26] = [
    Rule::text("ACK", |v, s| v.ack = s),
    Rule::text("AMT", |v, s| v.amount = s),
    Rule::text("AUTHORIZATIONID", |v, s| v.authorization_id = s),
    Rule::text("BILLINGAGREEMENTID", |v, s| v.billing_agreement_id = s),
    Rule::text("BUILD", |v, s| v.build = s),
    Rule::text("CORRELATIONID", |v, s| v.correlation_id = s),
    Rule::text("CURRENCYCODE", |v, s| v.currency_code = s),
    Rule::text("L_ERRORCODE0", |v, s| v.error_code = s),
    Rule::text("L_SHORTMESSAGE0", |v, s| v.error_message = s),
    Rule::text("L_LONGMESSAGE0", |v, s| v.error_message_extended = s),
    Rule::text("L_SEVERITYCODE0", |v, s| v.severity_code = s),
    Rule::text("ORDERTIME", |v, s| v.date_ordered = s),
    Rule::text("PAYMENTSTATUS", |v, s| v.payment_status = s),
    Rule::text("PAYMENTTYPE", |v, s| v.payment_type = s),
    Rule::text("PENDINGREASON", |v, s| v.pending_reason = s),
    Rule::text("PROTECTIONELIGIBILITY", |v, s| v.protection_eligibility = s),
    Rule::text("PROTECTIONELIGIBILITYTYPE", |v, s| v.protection_eligibility_type = s),
    Rule::text("REASONCODE", |v, s| v.reason_code = s),
    Rule::text("TAXAMT", |v, s| v.taxed_amount = s),
    Rule::text("TIMESTAMP", |v, s| v.timestamp = s),
    Rule::text("TOKEN", |v, s| v.token = s),
    Rule::text("TRANSACTIONID", |v, s| v.transaction_id = s),
    Rule::text("TRANSACTIONTYPE", |v, s| v.transaction_type = s),
    Rule::text("VERSION", |v, s| v.version = s),
    Rule::text("PROFILEID", |v, s| v.profile_id = s),
    Rule::text("PROFILESTATUS", |v, s| v.profile_status = s),
];

impl Projection for NvpValues {
    fn rules() -> &'static [Rule] {
        &NVP_RULES
    }
}
