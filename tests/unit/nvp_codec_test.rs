// Property-based tests for the NVP codec
//
// Properties tested:
// 1. A body encoded from a request decodes to the same fields, whatever the values
// 2. Segments without '=' are ignored when decoding
// 3. Every L_ERRORCODEn entry is parsed, in order
// 4. Setting a key twice never duplicates it
// 5. Redacted request bodies never contain the password or signature
// 6. Human-friendly keys ignore the payment prefixes and are lower-case

use paypal_digital_goods::modules::checkout::{NvpClient, Operation};
use paypal_digital_goods::modules::nvp::{human_key, NvpRequest, NvpResponse};
use paypal_digital_goods::{Config, Credentials};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,24}"
}

proptest! {
    /// Property: decoding an encoded request yields the original fields
    #[test]
    fn test_encoded_fields_decode_unchanged(
        fields in prop::collection::btree_map(key_strategy(), ".{0,40}", 1..20)
    ) {
        let mut request = NvpRequest::new();
        for (key, value) in &fields {
            request.push(key.as_str(), value.as_str());
        }

        let response = NvpResponse::parse(&request.encode().unwrap()).unwrap();
        let decoded: BTreeMap<String, String> = response
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        prop_assert_eq!(decoded, fields);
    }

    /// Property: segments without '=' never become fields
    #[test]
    fn test_segments_without_equals_ignored(
        junk in prop::collection::vec("[a-zA-Z0-9 ]{1,16}", 0..5)
    ) {
        let mut body = String::from("ACK=Success&TOKEN=EC%2d1");
        for segment in &junk {
            body.push('&');
            body.push_str(segment);
        }

        let response = NvpResponse::parse(&body).unwrap();
        prop_assert_eq!(response.len(), 2);
        prop_assert_eq!(response.get("TOKEN"), Some("EC-1"));
    }

    /// Property: every error entry is parsed in order
    #[test]
    fn test_all_error_messages_parsed(codes in prop::collection::vec(10000u32..=99999, 1..6)) {
        let mut body = String::from("ACK=Failure&CORRELATIONID=abc");
        for (n, code) in codes.iter().enumerate() {
            body.push_str(&format!(
                "&L_ERRORCODE{n}={code}&L_SHORTMESSAGE{n}=Short%20{code}&L_LONGMESSAGE{n}=Long%20{code}"
            ));
        }

        let response = NvpResponse::parse(&body).unwrap();
        let messages = response.messages();
        prop_assert_eq!(messages.len(), codes.len());
        for (message, code) in messages.iter().zip(&codes) {
            prop_assert_eq!(&message.code, &code.to_string());
            prop_assert_eq!(&message.long_message, &format!("Long {}", code));
        }

        let err = response.acknowledge("GetTransactionDetails", "https://nvp.test").unwrap_err();
        let first = codes[0].to_string();
        prop_assert_eq!(err.api_code(), Some(first.as_str()));
    }

    /// Property: repeated keys are replaced in place
    #[test]
    fn test_push_never_duplicates(
        keys in prop::collection::vec(prop::sample::select(vec!["AMT", "DESC", "TOKEN", "NOTE"]), 1..30)
    ) {
        let mut request = NvpRequest::new();
        for (n, key) in keys.iter().enumerate() {
            request.push(*key, n.to_string());
        }

        let distinct: std::collections::BTreeSet<&str> = keys.iter().copied().collect();
        prop_assert_eq!(request.len(), distinct.len());

        let last = keys.len() - 1;
        let expected = last.to_string();
        prop_assert_eq!(request.get(keys[last]), Some(expected.as_str()));
    }

    /// Property: credentials never reach the redacted body
    #[test]
    fn test_redacted_hides_credentials(
        password in "[a-z0-9]{8,24}",
        signature in "[A-Za-z0-9]{16,56}"
    ) {
        let password = format!("pw.{}", password);
        let signature = format!("sig.{}", signature);
        let config = Config::new(Credentials::new("seller_api1.example.com", &password, &signature).unwrap());
        let request = NvpClient::new(config).unwrap().request(Operation::GetTransactionDetails);

        let redacted = request.redacted();
        prop_assert!(!redacted.contains(&password));
        prop_assert!(!redacted.contains(&signature));
        prop_assert!(redacted.contains("PWD=xxxx"));
        prop_assert!(redacted.contains("SIGNATURE=xxxx"));
        let request_debug = format!("{:?}", request);
        prop_assert!(!request_debug.contains(&password));
        prop_assert!(request.encode().unwrap().contains("pw."));
    }

    /// Property: payment prefixes do not change the friendly name
    #[test]
    fn test_human_key_ignores_prefixes(key in key_strategy()) {
        let bare = human_key(&key);

        prop_assert_eq!(human_key(&format!("PAYMENTINFO_0_{}", key)), bare.clone());
        prop_assert_eq!(human_key(&format!("PAYMENTREQUEST_0_{}", key)), bare.clone());
        prop_assert_eq!(bare.to_lowercase(), bare);
    }
}

#[test]
fn test_known_human_keys() {
    assert_eq!(human_key("AMT"), "amount");
    assert_eq!(human_key("PAYMENTINFO_0_TRANSACTIONID"), "transaction_id");
    assert_eq!(human_key("PROFILEID"), "profile_id");
    assert_eq!(human_key("L_ERRORCODE0"), "l_errorcode0");
}
