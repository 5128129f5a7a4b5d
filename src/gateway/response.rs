//! Parsed gateway responses.

use crate::{
    gateway::{ApiFamily, Outcome},
    nvp::FieldMultimap,
    projection::{Projection, project},
};

/// One parsed gateway exchange.
///
/// Created once per HTTP response and never modified afterwards. The metadata
/// fields are copies of well-known keys; everything the gateway returned is in
/// [`fields`](Self::fields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    /// Family that produced the response.
    pub family: ApiFamily,
    /// `ACK` (NVP) or `RESULT` (Payflow), empty when absent.
    pub status: String,
    /// `L_SHORTMESSAGE0` (NVP) or `RESPMSG` (Payflow), empty when absent.
    pub message: String,
    /// `CORRELATIONID`.
    pub correlation_id: String,
    /// `TIMESTAMP`.
    pub timestamp: String,
    /// `VERSION`.
    pub version: String,
    /// `BUILD`.
    pub build: String,
    /// HTTP status code. Informational only, never used for classification.
    pub http_status: u16,
    /// Whether the request went to a sandbox endpoint.
    pub used_sandbox: bool,
    /// Every decoded field.
    pub fields: FieldMultimap,
}

impl GatewayResponse {
    /// Builds a response from decoded fields.
    #[must_use]
    pub fn new(
        family: ApiFamily,
        fields: FieldMultimap,
        http_status: u16,
        used_sandbox: bool,
    ) -> Self {
        let classifier = family.classifier();
        Self {
            family,
            status: fields.get_or_empty(classifier.status_key()).to_owned(),
            message: fields.get_or_empty(classifier.message_key()).to_owned(),
            correlation_id: fields.get_or_empty("CORRELATIONID").to_owned(),
            timestamp: fields.get_or_empty("TIMESTAMP").to_owned(),
            version: fields.get_or_empty("VERSION").to_owned(),
            build: fields.get_or_empty("BUILD").to_owned(),
            http_status,
            used_sandbox,
            fields,
        }
    }

    /// Classifies the response with its family's strategy.
    #[must_use]
    pub fn classify(&self) -> Outcome {
        self.family.classifier().classify(&self.fields)
    }

    /// Projects the raw fields into a typed result.
    #[must_use]
    pub fn project<T: Projection>(&self) -> T {
        project(&self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::PayflowValues;

    #[test]
    fn test_nvp_metadata() {
        let fields = FieldMultimap::parse(
            b"ACK=Success&CORRELATIONID=a1b2&TIMESTAMP=2024-03-01T10%3A00%3A00Z&VERSION=204&BUILD=2975009",
        )
        .unwrap();
        let response = GatewayResponse::new(ApiFamily::Nvp, fields, 200, true);

        assert_eq!(response.status, "Success");
        assert_eq!(response.correlation_id, "a1b2");
        assert_eq!(response.timestamp, "2024-03-01T10:00:00Z");
        assert_eq!(response.version, "204");
        assert_eq!(response.build, "2975009");
        assert!(response.used_sandbox);
        assert!(response.classify().is_success());
    }

    #[test]
    fn test_payflow_metadata() {
        let fields = FieldMultimap::parse(b"RESULT=12&RESPMSG=Declined&PNREF=A10F").unwrap();
        let response = GatewayResponse::new(ApiFamily::Payflow, fields, 200, false);

        assert_eq!(response.status, "12");
        assert_eq!(response.message, "Declined");
        assert!(response.correlation_id.is_empty());
        assert!(!response.classify().is_success());

        let values: PayflowValues = response.project();
        assert_eq!(values.result, 12);
        assert_eq!(values.pnref, "A10F");
    }
}
