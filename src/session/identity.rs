//! Advisory identity recovered from the bearer token's claims.
//!
//! The signature and expiry are NOT checked. The result only parameterizes
//! list queries; the backend remains the authority on who the caller is.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde_json::Value;

/// `sub` claim of the token's payload segment, or `None` when the token is
/// malformed in any way. Never fails.
pub fn username_from_token(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = decode_segment(payload)?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    claims
        .get("sub")?
        .as_str()
        .filter(|sub| !sub.is_empty())
        .map(str::to_owned)
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let segment = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| STANDARD_NO_PAD.decode(segment))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_sub_is_extracted() {
        let token = token_with_payload(r#"{"sub":"alice","exp":1}"#);
        assert_eq!(username_from_token(&token).as_deref(), Some("alice"));
    }

    #[test]
    fn test_padded_segment_is_accepted() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"sub":"bo"}"#);
        let token = format!("h.{payload}.s");
        assert_eq!(username_from_token(&token).as_deref(), Some("bo"));
    }

    #[test]
    fn test_malformed_tokens_have_no_identity() {
        assert_eq!(username_from_token(""), None);
        assert_eq!(username_from_token("not-a-jwt"), None);
        assert_eq!(username_from_token("a.%%%.c"), None);
        assert_eq!(username_from_token(&token_with_payload("not json")), None);
        assert_eq!(username_from_token(&token_with_payload(r#"{"name":"x"}"#)), None);
        assert_eq!(username_from_token(&token_with_payload(r#"{"sub":42}"#)), None);
        assert_eq!(username_from_token(&token_with_payload(r#"{"sub":""}"#)), None);
    }
}
