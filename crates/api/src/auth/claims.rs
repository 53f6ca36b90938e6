//! Claims carried by the bearer tokens the gateway forwards.
//!
//! The gateway has already verified the signature and expiry before a request
//! reaches this service, so decoding here only reads the payload. Tokens with
//! any signing algorithm are accepted as long as the payload parses.

use jsonwebtoken::{decode, DecodingKey, Validation};
use mealplan_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Identity claims embedded in every gateway token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The user's email address.
    pub email: String,
}

/// Decode a token's claims without checking its signature or expiry.
pub fn decode_unverified(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde_json::json;

    use super::*;

    fn sign(payload: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn decodes_claims_regardless_of_secret() {
        let token = sign(json!({"user_id": 7, "email": "cook@example.com"}), "gateway-only");
        let claims = decode_unverified(&token).expect("claims should decode");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "cook@example.com");
    }

    #[test]
    fn expired_tokens_still_decode() {
        let token = sign(
            json!({"user_id": 3, "email": "a@b.c", "exp": 1_000}),
            "whatever",
        );
        assert_eq!(decode_unverified(&token).unwrap().user_id, 3);
    }

    #[test]
    fn other_algorithms_are_accepted() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &json!({"user_id": 11, "email": "x@y.z"}),
            &EncodingKey::from_secret(b"k"),
        )
        .unwrap();
        assert_eq!(decode_unverified(&token).unwrap().user_id, 11);
    }

    #[test]
    fn missing_user_id_fails() {
        let token = sign(json!({"email": "a@b.c"}), "s");
        assert!(decode_unverified(&token).is_err());
    }

    #[test]
    fn garbage_fails() {
        assert!(decode_unverified("not-a-jwt").is_err());
        assert!(decode_unverified("a.b.c").is_err());
    }
}
