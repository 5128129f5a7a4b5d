use proptest::prelude::*;

use crate::{gateway::Credentials, nvp::FieldMultimap};

const CREDENTIAL_KEYS: [&str; 4] = ["USER", "PWD", "SIGNATURE", "VERSION"];

fn field_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[A-Z][A-Z_0-9]{0,15}", any::<String>()), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_encode_parse_roundtrip(pairs in field_pairs()) {
        let fields: FieldMultimap = pairs.into_iter().collect();

        let parsed = FieldMultimap::parse(fields.encode().as_bytes())
            .expect("encoded body must parse");

        prop_assert_eq!(parsed, fields);
    }

    #[test]
    fn test_encoded_body_has_no_raw_separators_in_values(value in any::<String>()) {
        let mut fields = FieldMultimap::new();
        fields.add("NOTE", value.clone());
        fields.add("AMT", "1.00");

        let parsed = FieldMultimap::parse(fields.encode().as_bytes())
            .expect("encoded body must parse");

        prop_assert_eq!(parsed.get("NOTE"), Some(value.as_str()));
        prop_assert_eq!(parsed.get("AMT"), Some("1.00"));
        prop_assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_parse_never_panics(body in any::<Vec<u8>>()) {
        let _ = FieldMultimap::parse(&body);
    }

    #[test]
    fn test_credential_override_is_last_writer_wins(
        pairs in field_pairs(),
        caller_values in prop::collection::vec("[a-z]{1,12}", 4),
    ) {
        let mut fields: FieldMultimap = pairs.into_iter().collect();
        for (key, value) in CREDENTIAL_KEYS.iter().zip(&caller_values) {
            fields.add(*key, value.as_str());
        }
        let before = fields.clone();

        Credentials::signature("api_user", "api_pwd", "api_sig").inject(&mut fields, "204");

        prop_assert_eq!(fields.get_all("USER"), ["api_user".to_owned()]);
        prop_assert_eq!(fields.get_all("PWD"), ["api_pwd".to_owned()]);
        prop_assert_eq!(fields.get_all("SIGNATURE"), ["api_sig".to_owned()]);
        prop_assert_eq!(fields.get_all("VERSION"), ["204".to_owned()]);
        for (key, _) in before.iter().filter(|(key, _)| !CREDENTIAL_KEYS.contains(key)) {
            prop_assert_eq!(fields.get_all(key), before.get_all(key));
        }
    }
}
