//! # Form Encoding Tests
//!
//! Values with reserved characters must decode back to exactly what was sent.

use crmtext::form::encode_form;

#[test]
fn test_reserved_characters_round_trip() {
    let values = [
        "plain",
        "a&b",
        "key=value",
        "with space",
        "100% sure",
        "plus+sign",
        "héllo wörld",
        "日本語のテキスト",
        "emoji 🙂 & more",
        "line\nbreak\ttab",
        r#"{"document":[{"content":"x & y"}]}"#,
        "",
    ];

    for value in values {
        let body = encode_form(&[("apikey", "k"), ("text", value)]).unwrap();
        let decoded: Vec<(String, String)> = serde_urlencoded::from_str(&body).unwrap();

        assert_eq!(
            decoded,
            vec![
                ("apikey".to_string(), "k".to_string()),
                ("text".to_string(), value.to_string()),
            ],
            "value {value:?} did not round-trip through {body:?}"
        );
    }
}

#[test]
fn test_encoded_body_has_no_raw_separators_in_values() {
    let body = encode_form(&[("text", "a&b=c")]).unwrap();
    assert_eq!(body.matches('&').count(), 0);
    assert_eq!(body.matches('=').count(), 1);
}
