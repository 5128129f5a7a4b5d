//! Success/failure classification of parsed gateway responses.
//!
//! Each family signals failure through the body, never through the HTTP
//! status line:
//!
//! | Family  | Failure when                                                        | Code            | Message           |
//! |---------|---------------------------------------------------------------------|-----------------|-------------------|
//! | NVP     | `ACK` is empty, `Failure`, `FailureWithWarning`, or `L_ERRORCODE0` is set | `L_ERRORCODE0` | `L_SHORTMESSAGE0` |
//! | Payflow | `RESULT` is anything but `"0"`                                       | `RESULT`        | `RESPMSG`         |

use std::fmt;

use serde::Serialize;

use crate::{gateway::ApiFamily, nvp::FieldMultimap};

/// Message used when a failure carries neither a code/message pair nor an ack.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "payment gateway service unavailable, please try again later";

/// Result of classifying a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The gateway accepted the request.
    Success,
    /// The gateway reported a failure.
    Failure(ClassifiedError),
}

impl Outcome {
    /// Returns true for [`Outcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Failure details extracted from a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedError {
    /// Family that produced the response.
    pub family: ApiFamily,
    /// Raw `ACK` (NVP) or `RESULT` (Payflow) value.
    pub ack: String,
    /// Error code: `L_ERRORCODE0` (NVP) or `RESULT` (Payflow).
    pub code: String,
    /// Short message: `L_SHORTMESSAGE0` (NVP) or `RESPMSG` (Payflow).
    pub short_message: String,
    /// Long message: `L_LONGMESSAGE0` (NVP only).
    pub long_message: String,
    /// Severity: `L_SEVERITYCODE0` (NVP only).
    pub severity: String,
}

impl fmt::Display for ClassifiedError {
    /// Renders `"<code>: <short message>"`, else the ack, else
    /// [`SERVICE_UNAVAILABLE_MESSAGE`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.code.is_empty() && !self.short_message.is_empty() {
            write!(f, "{}: {}", self.code, self.short_message)
        } else if !self.ack.is_empty() {
            f.write_str(&self.ack)
        } else {
            f.write_str(SERVICE_UNAVAILABLE_MESSAGE)
        }
    }
}

impl std::error::Error for ClassifiedError {}

/// Per-family success/failure strategy.
pub trait ResponseClassifier: Send + Sync {
    /// Family this classifier understands.
    fn family(&self) -> ApiFamily;

    /// Key holding the top-level acknowledgment (`ACK` or `RESULT`).
    fn status_key(&self) -> &'static str;

    /// Key holding the human-readable message.
    fn message_key(&self) -> &'static str;

    /// Classifies parsed response fields.
    fn classify(&self, fields: &FieldMultimap) -> Outcome;
}

/// Classifier for the PayPal Classic NVP API.
#[derive(Debug, Clone, Copy, Default)]
pub struct NvpClassifier;

impl ResponseClassifier for NvpClassifier {
    fn family(&self) -> ApiFamily {
        ApiFamily::Nvp
    }

    fn status_key(&self) -> &'static str {
        "ACK"
    }

    fn message_key(&self) -> &'static str {
        "L_SHORTMESSAGE0"
    }

    fn classify(&self, fields: &FieldMultimap) -> Outcome {
        let ack = fields.get_or_empty("ACK");
        let code = fields.get_or_empty("L_ERRORCODE0");

        // An error code is authoritative even next to a benign ACK.
        let failed = ack.is_empty()
            || ack.eq_ignore_ascii_case("failure")
            || ack.eq_ignore_ascii_case("failurewithwarning")
            || !code.is_empty();
        if !failed {
            return Outcome::Success;
        }

        Outcome::Failure(ClassifiedError {
            family: ApiFamily::Nvp,
            ack: ack.to_owned(),
            code: code.to_owned(),
            short_message: fields.get_or_empty("L_SHORTMESSAGE0").to_owned(),
            long_message: fields.get_or_empty("L_LONGMESSAGE0").to_owned(),
            severity: fields.get_or_empty("L_SEVERITYCODE0").to_owned(),
        })
    }
}

/// Classifier for the Payflow gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayflowClassifier;

impl ResponseClassifier for PayflowClassifier {
    fn family(&self) -> ApiFamily {
        ApiFamily::Payflow
    }

    fn status_key(&self) -> &'static str {
        "RESULT"
    }

    fn message_key(&self) -> &'static str {
        "RESPMSG"
    }

    fn classify(&self, fields: &FieldMultimap) -> Outcome {
        let result = fields.get_or_empty("RESULT");
        if result == "0" {
            return Outcome::Success;
        }

        Outcome::Failure(ClassifiedError {
            family: ApiFamily::Payflow,
            ack: result.to_owned(),
            code: result.to_owned(),
            short_message: fields.get_or_empty("RESPMSG").to_owned(),
            long_message: String::new(),
            severity: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FieldMultimap {
        pairs.iter().copied().collect()
    }

    fn failure(outcome: Outcome) -> ClassifiedError {
        match outcome {
            Outcome::Failure(error) => error,
            Outcome::Success => panic!("expected failure"),
        }
    }

    #[test]
    fn test_nvp_success() {
        let outcome = NvpClassifier.classify(&fields(&[("ACK", "Success")]));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_nvp_success_with_warning_and_no_code() {
        let outcome = NvpClassifier.classify(&fields(&[("ACK", "SuccessWithWarning")]));
        assert_eq!(outcome, Outcome::Success);
    }

    #[test]
    fn test_nvp_failure_with_code() {
        let error = failure(NvpClassifier.classify(&fields(&[
            ("ACK", "Failure"),
            ("L_ERRORCODE0", "15005"),
            ("L_SHORTMESSAGE0", "Processor Decline"),
            ("L_LONGMESSAGE0", "This transaction cannot be processed."),
            ("L_SEVERITYCODE0", "Error"),
        ])));

        assert_eq!(error.code, "15005");
        assert_eq!(error.ack, "Failure");
        assert_eq!(error.long_message, "This transaction cannot be processed.");
        assert_eq!(error.severity, "Error");
        assert_eq!(error.to_string(), "15005: Processor Decline");
    }

    #[test]
    fn test_nvp_ack_is_case_insensitive() {
        let outcome = NvpClassifier.classify(&fields(&[("ACK", "FAILUREWITHWARNING")]));
        assert_eq!(failure(outcome).to_string(), "FAILUREWITHWARNING");

        let outcome = NvpClassifier.classify(&fields(&[("ACK", "failure")]));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_nvp_error_code_overrides_benign_ack() {
        let error = failure(NvpClassifier.classify(&fields(&[
            ("ACK", "SuccessWithWarning"),
            ("L_ERRORCODE0", "11607"),
            ("L_SHORTMESSAGE0", "Duplicate Request"),
        ])));
        assert_eq!(error.code, "11607");
        assert_eq!(error.to_string(), "11607: Duplicate Request");
    }

    #[test]
    fn test_nvp_empty_error_code_is_ignored() {
        let outcome = NvpClassifier.classify(&fields(&[("ACK", "Success"), ("L_ERRORCODE0", "")]));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_nvp_missing_ack_is_failure_with_fallback() {
        let error = failure(NvpClassifier.classify(&FieldMultimap::new()));
        assert!(error.ack.is_empty());
        assert_eq!(error.to_string(), SERVICE_UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_nvp_code_without_message_falls_back_to_ack() {
        let response = fields(&[("ACK", "Failure"), ("L_ERRORCODE0", "10001")]);
        let error = failure(NvpClassifier.classify(&response));
        assert_eq!(error.to_string(), "Failure");
    }

    #[test]
    fn test_payflow_success() {
        assert!(PayflowClassifier.classify(&fields(&[("RESULT", "0")])).is_success());
    }

    #[test]
    fn test_payflow_failure() {
        let error = failure(PayflowClassifier.classify(&fields(&[
            ("RESULT", "23"),
            ("RESPMSG", "Invalid account number"),
        ])));
        assert_eq!(error.code, "23");
        assert_eq!(error.ack, "23");
        assert_eq!(error.to_string(), "23: Invalid account number");
    }

    #[test]
    fn test_payflow_negative_result_is_failure() {
        let error = failure(PayflowClassifier.classify(&fields(&[("RESULT", "-1")])));
        assert_eq!(error.to_string(), "-1");
    }

    #[test]
    fn test_payflow_empty_is_failure_with_fallback() {
        let error = failure(PayflowClassifier.classify(&FieldMultimap::new()));
        assert_eq!(error.to_string(), SERVICE_UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_payflow_zero_with_padding_is_failure() {
        assert!(!PayflowClassifier.classify(&fields(&[("RESULT", "00")])).is_success());
    }

    #[test]
    fn test_family_strategy_lookup() {
        assert_eq!(ApiFamily::Nvp.classifier().family(), ApiFamily::Nvp);
        assert_eq!(ApiFamily::Payflow.classifier().status_key(), "RESULT");
        assert_eq!(ApiFamily::Payflow.classifier().message_key(), "RESPMSG");
    }
}
