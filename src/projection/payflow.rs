//! Typed result for Payflow transaction responses.

use serde::Serialize;

use super::{FieldRule, Projection};

/// Every value a Payflow transaction response may carry.
///
/// Fields documented as high verbosity are only returned when the request
/// set `VERBOSITY=HIGH`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayflowValues {
    /// `ADDLMSGS`
    pub additional_messages: String,
    /// `AMT`
    pub amount: String,
    /// `AMEXID`, high verbosity.
    pub amex_id: String,
    /// `AMEXPOSID`, high verbosity.
    pub amex_pos_id: String,
    /// `AUTHCODE`
    pub auth_code: String,
    /// `AVSADDR`
    pub avs_address: String,
    /// `AVSZIP`
    pub avs_zipcode: String,
    /// `IAVS`
    pub avs_international: String,
    /// `CARDTYPE`, high verbosity.
    pub card_type: String,
    /// `CORRELATIONID`
    pub correlation_id: String,
    /// `CCTRANSID`
    pub cc_trans_id: String,
    /// `CCTRANS_POSDATA`
    pub cc_trans_pos_data: String,
    /// `CVV2MATCH`
    pub cvv2_match: Option<char>,
    /// `DATE_TO_SETTLE`, inquiry transactions only.
    pub date_to_settle: String,
    /// `DUPLICATE`
    ///
    /// `2` when the ORDERID was already submitted, `1` when the request id was,
    /// `-1` when the gateway database could not tell.
    pub duplicate: String,
    /// `EMAILMATCH`
    pub email_match: Option<char>,
    /// `EXTRAPMSG`
    pub extra_processor_message: String,
    /// `HOSTCODE`, high verbosity.
    pub host_code: String,
    /// `ORIGAMT`
    pub original_amount: String,
    /// `PAYMENTADVICECODE`
    ///
    /// `03` or `21` mean the merchant must stop the recurring transaction.
    pub payment_advice_code: String,
    /// `PAYMENTTYPE`
    pub payment_type: String,
    /// `PHONEMATCH`
    pub phone_match: Option<char>,
    /// `PNREF`
    pub pnref: String,
    /// `PPREF`
    pub ppref: String,
    /// `PROCCARDSECURE`, high verbosity.
    pub processor_card_secure: Option<char>,
    /// `PROCAVS`, high verbosity.
    pub processor_avs: Option<char>,
    /// `PROCCVV2`, high verbosity.
    pub processor_cvv2: Option<char>,
    /// `RESULT`
    pub result: i32,
    /// `RESPMSG`
    pub response_message: String,
    /// `RESPTEXT`, high verbosity.
    pub response_text: String,
    /// `TRANSTIME`
    pub time_of_transaction: String,
    /// `TRANSSTATE`
    pub transaction_state: i32,
}

type Rule = FieldRule<PayflowValues>;

static PAYFLOW_RULES: [Rule; 32] = [
    Rule::text("ADDLMSGS", |v, s| v.additional_messages = s),
    Rule::text("AMT", |v, s| v.amount = s),
    Rule::text("AMEXID", |v, s| v.amex_id = s).high(),
    Rule::text("AMEXPOSID", |v, s| v.amex_pos_id = s).high(),
    Rule::text("AUTHCODE", |v, s| v.auth_code = s),
    Rule::text("AVSADDR", |v, s| v.avs_address = s),
    Rule::text("AVSZIP", |v, s| v.avs_zipcode = s),
    Rule::text("IAVS", |v, s| v.avs_international = s),
    Rule::text("CARDTYPE", |v, s| v.card_type = s).high(),
    Rule::text("CORRELATIONID", |v, s| v.correlation_id = s),
    Rule::text("CCTRANSID", |v, s| v.cc_trans_id = s),
    Rule::text("CCTRANS_POSDATA", |v, s| v.cc_trans_pos_data = s),
    Rule::character("CVV2MATCH", |v, c| v.cvv2_match = c),
    Rule::text("DATE_TO_SETTLE", |v, s| v.date_to_settle = s),
    Rule::text("DUPLICATE", |v, s| v.duplicate = s),
    Rule::character("EMAILMATCH", |v, c| v.email_match = c),
    Rule::text("EXTRAPMSG", |v, s| v.extra_processor_message = s),
    Rule::text("HOSTCODE", |v, s| v.host_code = s).high(),
    Rule::text("ORIGAMT", |v, s| v.original_amount = s),
    Rule::text("PAYMENTADVICECODE", |v, s| v.payment_advice_code = s),
    Rule::text("PAYMENTTYPE", |v, s| v.payment_type = s),
    Rule::character("PHONEMATCH", |v, c| v.phone_match = c),
    Rule::text("PNREF", |v, s| v.pnref = s),
    Rule::text("PPREF", |v, s| v.ppref = s),
    Rule::character("PROCCARDSECURE", |v, c| v.processor_card_secure = c).high(),
    Rule::character("PROCAVS", |v, c| v.processor_avs = c).high(),
    Rule::character("PROCCVV2", |v, c| v.processor_cvv2 = c).high(),
    Rule::integer("RESULT", |v, n| v.result = n),
    Rule::text("RESPMSG", |v, s| v.response_message = s),
    Rule::text("RESPTEXT", |v, s| v.response_text = s).high(),
    Rule::text("TRANSTIME", |v, s| v.time_of_transaction = s),
    Rule::integer("TRANSSTATE", |v, n| v.transaction_state = n),
];

impl Projection for PayflowValues {
    fn rules() -> &'static [Rule] {
        &PAYFLOW_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        nvp::FieldMultimap,
        projection::{Verbosity, project},
    };

    #[test]
    fn test_empty_response_is_all_zero() {
        let values: PayflowValues = project(&FieldMultimap::new());
        assert_eq!(values, PayflowValues::default());
        assert_eq!(values.result, 0);
        assert_eq!(values.transaction_state, 0);
        assert_eq!(values.cvv2_match, None);
        assert!(values.pnref.is_empty());
    }

    #[test]
    fn test_amount_and_match_character() {
        let mut fields = FieldMultimap::new();
        fields.add("AMT", "3.50");
        fields.add("CVV2MATCH", "Y");

        let values: PayflowValues = project(&fields);
        assert_eq!(values.amount, "3.50");
        assert_eq!(values.cvv2_match, Some('Y'));
    }

    #[test]
    fn test_sale_response() {
        let fields = FieldMultimap::parse(
            b"RESULT=0&PNREF=A70E0B1A2C3D&RESPMSG=Approved&AUTHCODE=010101&AVSADDR=Y&AVSZIP=N\
              &IAVS=N&CVV2MATCH=Y&EMAILMATCH=N&PHONEMATCH=X&TRANSSTATE=8&DUPLICATE=-1",
        )
        .unwrap();

        let values: PayflowValues = project(&fields);
        assert_eq!(values.result, 0);
        assert_eq!(values.pnref, "A70E0B1A2C3D");
        assert_eq!(values.response_message, "Approved");
        assert_eq!(values.auth_code, "010101");
        assert_eq!(values.avs_address, "Y");
        assert_eq!(values.email_match, Some('N'));
        assert_eq!(values.phone_match, Some('X'));
        assert_eq!(values.transaction_state, 8);
        assert_eq!(values.duplicate, "-1");
    }

    #[test]
    fn test_high_verbosity_fields() {
        let fields = FieldMultimap::parse(
            b"RESULT=0&CARDTYPE=3&HOSTCODE=A&RESPTEXT=AP&PROCAVS=Y&PROCCVV2=M&PROCCARDSECURE=",
        )
        .unwrap();

        let values: PayflowValues = project(&fields);
        assert_eq!(values.card_type, "3");
        assert_eq!(values.host_code, "A");
        assert_eq!(values.response_text, "AP");
        assert_eq!(values.processor_avs, Some('Y'));
        assert_eq!(values.processor_cvv2, Some('M'));
        assert_eq!(values.processor_card_secure, None);
    }

    #[test]
    fn test_high_verbosity_keys() {
        let high: Vec<_> = PayflowValues::rules()
            .iter()
            .filter(|rule| rule.verbosity == Verbosity::High)
            .map(|rule| rule.key)
            .collect();

        assert_eq!(
            high,
            [
                "AMEXID",
                "AMEXPOSID",
                "CARDTYPE",
                "HOSTCODE",
                "PROCCARDSECURE",
                "PROCAVS",
                "PROCCVV2",
                "RESPTEXT"
            ]
        );
    }

    #[test]
    fn test_negative_result() {
        let fields = FieldMultimap::parse(b"RESULT=-1&RESPMSG=Failed+to+connect+to+host").unwrap();
        let values: PayflowValues = project(&fields);
        assert_eq!(values.result, -1);
    }

    #[test]
    fn test_malformed_result_falls_back_to_zero() {
        let fields = FieldMultimap::parse(b"RESULT=OK").unwrap();
        let values: PayflowValues = project(&fields);
        assert_eq!(values.result, 0);
    }
}
