//! Token claims and format constants.

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

/// The only signing algorithm this service issues or accepts.
pub const JWT_ALGORITHM: Algorithm = Algorithm::PS512;

/// Algorithm tag as it appears in token headers and the JWK.
pub const JWT_ALGORITHM_NAME: &str = "PS512";

/// Registered claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, fixed per deployment.
    pub iss: String,
    /// Audience, fixed per deployment.
    pub aud: String,
    /// Subject: the caller-supplied user identifier.
    pub sub: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Not-before: issued-at minus the clock-skew allowance.
    pub nbf: i64,
    /// Expiry: issued-at plus the token lifetime.
    pub exp: i64,
    /// Unique token id, fresh per issuance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_shape() {
        let claims = Claims {
            iss: "JWT API Simulation".to_string(),
            aud: "JWT API Simulation".to_string(),
            sub: "user-123".to_string(),
            iat: 1_700_000_000,
            nbf: 1_699_999_998,
            exp: 1_700_000_030,
            jti: Some("abc".to_string()),
        };

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["sub"], "user-123");
        assert_eq!(value["exp"], 1_700_000_030i64);
        assert_eq!(value["jti"], "abc");
    }

    #[test]
    fn test_jti_omitted_when_absent() {
        let claims = Claims {
            iss: "i".to_string(),
            aud: "a".to_string(),
            sub: "s".to_string(),
            iat: 0,
            nbf: 0,
            exp: 30,
            jti: None,
        };

        let value = serde_json::to_value(&claims).unwrap();
        assert!(value.get("jti").is_none());
    }

    #[test]
    fn test_claims_deserialize_tolerates_missing_jti() {
        let value = serde_json::json!({
            "iss": "i", "aud": "a", "sub": "s",
            "iat": 0, "nbf": 0, "exp": 30,
        });
        let claims: Claims = serde_json::from_value(value).unwrap();
        assert!(claims.jti.is_none());
    }
}
