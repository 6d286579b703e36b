//! Event payload mutation.
//!
//! # Data Flow
//! ```text
//! raw body bytes
//!     → serde_json parse (must be a top-level object)
//!     → set user.ip_address (create `user` when absent)
//!     → re-serialize
//! ```
//!
//! # Design Decisions
//! - Key order is kept (`preserve_order`) and number text is kept exact
//!   (`arbitrary_precision`); whitespace is not preserved
//! - The IP goes in as a JSON string value, so serde_json does the escaping
//! - No best-effort patching of anything that is not a JSON object
//! - Nesting is capped by serde_json's recursion limit (128 levels); deeper
//!   documents are rejected as malformed rather than parsed on the stack

use serde_json::{Map, Value};

use crate::error::ProxyError;

pub const USER_KEY: &str = "user";
pub const IP_ADDRESS_KEY: &str = "ip_address";

/// Set `user.ip_address` in the JSON object `body` to `ip`.
pub fn inject_ip(body: &[u8], ip: &str) -> Result<Vec<u8>, ProxyError> {
    let mut document: Value =
        serde_json::from_slice(body).map_err(|e| ProxyError::MalformedJsonBody(e.to_string()))?;

    let root = document
        .as_object_mut()
        .ok_or_else(|| ProxyError::MalformedJsonBody("top-level value is not an object".into()))?;

    let user = root
        .entry(USER_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if user.is_null() {
        *user = Value::Object(Map::new());
    }
    let user = user.as_object_mut().ok_or_else(|| {
        ProxyError::MalformedJsonBody(format!("`{USER_KEY}` is not an object"))
    })?;
    user.insert(IP_ADDRESS_KEY.to_string(), Value::String(ip.to_string()));

    serde_json::to_vec(&document).map_err(|e| ProxyError::MalformedJsonBody(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_creates_user_object() {
        let out = inject_ip(br#"{"message":"x"}"#, "1.2.3.4").unwrap();
        assert_eq!(
            parse(&out),
            json!({"message": "x", "user": {"ip_address": "1.2.3.4"}})
        );
    }

    #[test]
    fn test_overwrites_existing_ip_and_keeps_siblings() {
        let body = br#"{"event_id":"abc","user":{"id":"42","ip_address":"{{auto}}"},"extra":{"n":[1,2,3]}}"#;
        let out = inject_ip(body, "198.51.100.9").unwrap();
        assert_eq!(
            parse(&out),
            json!({
                "event_id": "abc",
                "user": {"id": "42", "ip_address": "198.51.100.9"},
                "extra": {"n": [1, 2, 3]}
            })
        );
    }

    #[test]
    fn test_preserves_key_order() {
        let out = inject_ip(br#"{"z":1,"a":2,"user":{"b":1,"a":2}}"#, "::1").unwrap();
        assert_eq!(
            std::str::from_utf8(&out).unwrap(),
            r#"{"z":1,"a":2,"user":{"b":1,"a":2,"ip_address":"::1"}}"#
        );
    }

    #[test]
    fn test_preserves_number_text() {
        let body = br#"{"timestamp":1700000000.123456789012345,"big":123456789012345678901234567890}"#;
        let out = inject_ip(body, "1.2.3.4").unwrap();
        let text = std::str::from_utf8(&out).unwrap();
        assert!(text.contains("1700000000.123456789012345"));
        assert!(text.contains("123456789012345678901234567890"));
    }

    #[test]
    fn test_null_user_replaced() {
        let out = inject_ip(br#"{"user":null}"#, "1.2.3.4").unwrap();
        assert_eq!(parse(&out), json!({"user": {"ip_address": "1.2.3.4"}}));
    }

    #[test]
    fn test_value_is_escaped() {
        let hostile = r#"1.2.3.4","admin":true,"x":""#;
        let out = inject_ip(br#"{}"#, hostile).unwrap();
        let value = parse(&out);
        assert_eq!(value["user"]["ip_address"], json!(hostile));
        assert!(value.get("admin").is_none());
        assert_eq!(value["user"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_non_json() {
        for body in [
            &b"not json"[..],
            b"",
            b"{\"a\":",
            b"{\"a\":1} trailing",
        ] {
            assert!(
                matches!(inject_ip(body, "1.2.3.4"), Err(ProxyError::MalformedJsonBody(_))),
                "{:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_rejects_non_object_documents() {
        for body in [&b"[]"[..], b"\"str\"", b"42", b"null", br#"{"user":"bob"}"#, br#"{"user":[1]}"#] {
            assert!(
                matches!(inject_ip(body, "1.2.3.4"), Err(ProxyError::MalformedJsonBody(_))),
                "{:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    fn nested(depth: usize) -> Vec<u8> {
        format!(r#"{{"extra":{}1{}}}"#, "[".repeat(depth), "]".repeat(depth)).into_bytes()
    }

    #[test]
    fn test_nesting_depth_cap() {
        let out = inject_ip(&nested(100), "1.2.3.4").unwrap();
        assert_eq!(parse(&out)["user"]["ip_address"], json!("1.2.3.4"));

        assert!(matches!(
            inject_ip(&nested(200), "1.2.3.4"),
            Err(ProxyError::MalformedJsonBody(msg)) if msg.contains("recursion limit")
        ));
    }
}
