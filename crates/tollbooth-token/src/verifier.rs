//! Token verification with a fixed, short-circuiting check order.

use crate::claims::{Claims, JWT_ALGORITHM};
use crate::error::VerifyError;
use crate::keys::SigningKey;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, Header, Validation, decode, decode_header};
use serde::Serialize;
use serde_json::Value;
use tollbooth_core::TokenSettings;

/// A fully verified token: decoded header plus validated claims.
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedToken {
    pub header: Header,
    pub claims: Claims,
}

/// Verifies tokens against the process public key.
///
/// The accepted algorithm and key id are pinned at construction and never
/// taken from the token under inspection.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding: DecodingKey,
    kid: String,
    settings: TokenSettings,
}

impl TokenVerifier {
    /// Create a new verifier over the signing key's public half.
    pub fn new(key: &SigningKey, settings: TokenSettings) -> Self {
        Self {
            decoding: key.decoding_key().clone(),
            kid: key.kid().to_string(),
            settings,
        }
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, VerifyError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token anchored at an explicit unix timestamp.
    ///
    /// Checks run in a strict order and short-circuit: header decode,
    /// algorithm/kid pin, signature, required-claims presence, expiry and
    /// not-before under leeway, issuer, audience. Claims are only returned
    /// once every check has passed.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<VerifiedToken, VerifyError> {
        if token.is_empty() {
            return Err(VerifyError::MissingToken);
        }

        let header =
            decode_header(token).map_err(|e| VerifyError::MalformedToken(e.to_string()))?;

        // The algorithm is pinned; the token header never chooses it.
        if header.alg != JWT_ALGORITHM {
            return Err(VerifyError::InvalidSignature(format!(
                "unexpected algorithm {:?}",
                header.alg
            )));
        }
        if header.kid.as_deref() != Some(self.kid.as_str()) {
            return Err(VerifyError::InvalidSignature("unknown key id".to_string()));
        }

        // Signature only; claim checks run below in their fixed order.
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        let data = decode::<Value>(token, &self.decoding, &validation)
            .map_err(|e| VerifyError::InvalidSignature(e.to_string()))?;
        let raw = data.claims;

        let exp = require_int(&raw, "exp")?;
        require_int(&raw, "iat")?;
        let nbf = require_int(&raw, "nbf")?;
        let iss = require_str(&raw, "iss")?;
        let aud = require_str(&raw, "aud")?;
        require_str(&raw, "sub")?;

        let leeway = self.settings.leeway_secs;
        if now >= exp + leeway {
            return Err(VerifyError::Expired);
        }
        if nbf > now + leeway {
            return Err(VerifyError::NotYetValid);
        }

        if iss != self.settings.issuer {
            return Err(VerifyError::IssuerMismatch);
        }
        if aud != self.settings.audience {
            return Err(VerifyError::AudienceMismatch);
        }

        let claims: Claims = serde_json::from_value(raw)
            .map_err(|e| VerifyError::MissingClaims(e.to_string()))?;

        Ok(VerifiedToken { header, claims })
    }
}

fn require_int(claims: &Value, name: &str) -> Result<i64, VerifyError> {
    claims
        .get(name)
        .and_then(Value::as_i64)
        .ok_or_else(|| VerifyError::MissingClaims(name.to_string()))
}

fn require_str<'a>(claims: &'a Value, name: &str) -> Result<&'a str, VerifyError> {
    claims
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| VerifyError::MissingClaims(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuer::TokenIssuer;
    use crate::test_support;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use jsonwebtoken::{Algorithm, EncodingKey, encode};
    use std::sync::Arc;

    const NOW: i64 = 1_700_000_000;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(
            Arc::new(test_support::signing_key().clone()),
            TokenSettings::default(),
        )
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(test_support::signing_key(), TokenSettings::default())
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let issued = issuer().issue_at("user-123", NOW).unwrap();
        let verified = verifier().verify_at(&issued.token, NOW).unwrap();

        assert_eq!(verified.claims.sub, "user-123");
        assert_eq!(verified.claims.iss, "JWT API Simulation");
        assert_eq!(verified.claims.aud, "JWT API Simulation");
        assert_eq!(verified.claims.exp - verified.claims.iat, 30);
        assert!(verified.claims.nbf <= verified.claims.iat);
        assert_eq!(
            verified.header.kid.as_deref(),
            Some(test_support::signing_key().kid())
        );
    }

    #[test]
    fn test_distinct_token_ids_per_issuance() {
        let issuer = issuer();
        let verifier = verifier();

        let a = issuer.issue_at("user-123", NOW).unwrap();
        let b = issuer.issue_at("user-123", NOW).unwrap();

        let jti_a = verifier.verify_at(&a.token, NOW).unwrap().claims.jti;
        let jti_b = verifier.verify_at(&b.token, NOW).unwrap().claims.jti;
        assert!(jti_a.is_some());
        assert_ne!(jti_a, jti_b);
    }

    #[test]
    fn test_empty_token_is_missing() {
        let result = verifier().verify_at("", NOW);
        assert!(matches!(result, Err(VerifyError::MissingToken)));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let result = verifier().verify_at("not-a-jwt", NOW);
        assert!(matches!(result, Err(VerifyError::MalformedToken(_))));
    }

    #[test]
    fn test_expired_token_rejected_after_leeway() {
        let issued = issuer().issue_at("user-123", NOW).unwrap();
        let verifier = verifier();

        // still valid inside the leeway window
        assert!(verifier.verify_at(&issued.token, NOW + 31).is_ok());

        let result = verifier.verify_at(&issued.token, NOW + 33);
        assert!(matches!(result, Err(VerifyError::Expired)));
    }

    #[test]
    fn test_token_before_nbf_rejected() {
        let issued = issuer().issue_at("user-123", NOW).unwrap();
        // nbf is NOW - 2; anchor the clock well before it
        let result = verifier().verify_at(&issued.token, NOW - 10);
        assert!(matches!(result, Err(VerifyError::NotYetValid)));
    }

    #[test]
    fn test_tampered_signature_rejected_without_claim_exposure() {
        let issued = issuer().issue_at("user-123", NOW).unwrap();

        let mut parts: Vec<String> = issued.token.split('.').map(String::from).collect();
        let mut sig = URL_SAFE_NO_PAD.decode(&parts[2]).unwrap();
        sig[0] ^= 0x01;
        parts[2] = URL_SAFE_NO_PAD.encode(&sig);
        let tampered = parts.join(".");

        let result = verifier().verify_at(&tampered, NOW);
        assert!(matches!(result, Err(VerifyError::InvalidSignature(_))));
    }

    #[test]
    fn test_token_from_another_key_rejected() {
        let other = SigningKey::generate(2048).unwrap();
        let foreign_issuer =
            TokenIssuer::new(Arc::new(other), TokenSettings::default());
        let issued = foreign_issuer.issue_at("user-123", NOW).unwrap();

        // foreign kid fails the pin before the signature is even tried
        let result = verifier().verify_at(&issued.token, NOW);
        assert!(matches!(result, Err(VerifyError::InvalidSignature(_))));
    }

    #[test]
    fn test_none_algorithm_never_accepted() {
        let key = test_support::signing_key();
        let header = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"typ":"JWT","alg":"none","kid":"{}"}}"#,
            key.kid()
        ));
        let payload = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"iss":"JWT API Simulation","aud":"JWT API Simulation","sub":"user-123","iat":{NOW},"nbf":{NOW},"exp":{}}}"#,
            NOW + 30
        ));
        let unsigned = format!("{header}.{payload}.");

        assert!(verifier().verify_at(&unsigned, NOW).is_err());
    }

    #[test]
    fn test_wrong_algorithm_with_valid_key_rejected() {
        // RS256-signed with the same RSA key: the pin must refuse it.
        let key = test_support::signing_key();
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(key.kid().to_string());

        let claims = Claims {
            iss: "JWT API Simulation".to_string(),
            aud: "JWT API Simulation".to_string(),
            sub: "user-123".to_string(),
            iat: NOW,
            nbf: NOW - 2,
            exp: NOW + 30,
            jti: Some("x".to_string()),
        };
        let encoding = EncodingKey::from_rsa_pem(key.private_key_pem().as_bytes()).unwrap();
        let token = encode(&header, &claims, &encoding).unwrap();

        let result = verifier().verify_at(&token, NOW);
        assert!(matches!(result, Err(VerifyError::InvalidSignature(_))));
    }

    #[test]
    fn test_missing_claim_detected_after_signature() {
        // Sign a claim set without `sub`; the signature is valid, so the
        // failure must come from the presence check.
        let key = test_support::signing_key();
        let mut header = Header::new(JWT_ALGORITHM);
        header.kid = Some(key.kid().to_string());

        let claims = serde_json::json!({
            "iss": "JWT API Simulation",
            "aud": "JWT API Simulation",
            "iat": NOW,
            "nbf": NOW - 2,
            "exp": NOW + 30,
        });
        let token = encode(&header, &claims, key.encoding_key()).unwrap();

        let result = verifier().verify_at(&token, NOW);
        match result {
            Err(VerifyError::MissingClaims(claim)) => assert_eq!(claim, "sub"),
            other => panic!("expected MissingClaims, got {other:?}"),
        }
    }

    #[test]
    fn test_wrongly_typed_claim_counts_as_missing() {
        let key = test_support::signing_key();
        let mut header = Header::new(JWT_ALGORITHM);
        header.kid = Some(key.kid().to_string());

        let claims = serde_json::json!({
            "iss": "JWT API Simulation",
            "aud": "JWT API Simulation",
            "sub": "user-123",
            "iat": NOW,
            "nbf": NOW - 2,
            "exp": "soon",
        });
        let token = encode(&header, &claims, key.encoding_key()).unwrap();

        let result = verifier().verify_at(&token, NOW);
        assert!(matches!(result, Err(VerifyError::MissingClaims(c)) if c == "exp"));
    }

    #[test]
    fn test_issuer_mismatch() {
        let settings = TokenSettings {
            issuer: "someone else".to_string(),
            ..TokenSettings::default()
        };
        let foreign_issuer = TokenIssuer::new(
            Arc::new(test_support::signing_key().clone()),
            settings,
        );
        let issued = foreign_issuer.issue_at("user-123", NOW).unwrap();

        let result = verifier().verify_at(&issued.token, NOW);
        assert!(matches!(result, Err(VerifyError::IssuerMismatch)));
    }

    #[test]
    fn test_audience_mismatch() {
        let settings = TokenSettings {
            audience: "someone else".to_string(),
            ..TokenSettings::default()
        };
        let foreign_issuer = TokenIssuer::new(
            Arc::new(test_support::signing_key().clone()),
            settings,
        );
        let issued = foreign_issuer.issue_at("user-123", NOW).unwrap();

        let result = verifier().verify_at(&issued.token, NOW);
        assert!(matches!(result, Err(VerifyError::AudienceMismatch)));
    }

    #[test]
    fn test_issuer_checked_before_audience() {
        // Both claims wrong: the issuer check must fire first.
        let settings = TokenSettings {
            issuer: "other iss".to_string(),
            audience: "other aud".to_string(),
            ..TokenSettings::default()
        };
        let foreign_issuer = TokenIssuer::new(
            Arc::new(test_support::signing_key().clone()),
            settings,
        );
        let issued = foreign_issuer.issue_at("user-123", NOW).unwrap();

        let result = verifier().verify_at(&issued.token, NOW);
        assert!(matches!(result, Err(VerifyError::IssuerMismatch)));
    }

    #[test]
    fn test_expiry_checked_before_issuer() {
        // Expired token with a wrong issuer must be reported as expired.
        let settings = TokenSettings {
            issuer: "other iss".to_string(),
            ..TokenSettings::default()
        };
        let foreign_issuer = TokenIssuer::new(
            Arc::new(test_support::signing_key().clone()),
            settings,
        );
        let issued = foreign_issuer.issue_at("user-123", NOW - 100).unwrap();

        let result = verifier().verify_at(&issued.token, NOW);
        assert!(matches!(result, Err(VerifyError::Expired)));
    }

    #[test]
    fn test_shorter_lifetime_settings() {
        let settings = TokenSettings {
            lifetime_secs: 5,
            leeway_secs: 0,
            ..TokenSettings::default()
        };
        let issuer = TokenIssuer::new(
            Arc::new(test_support::signing_key().clone()),
            settings.clone(),
        );
        let verifier = TokenVerifier::new(test_support::signing_key(), settings);

        let issued = issuer.issue_at("user-123", NOW).unwrap();
        assert!(verifier.verify_at(&issued.token, NOW + 4).is_ok());
        assert!(matches!(
            verifier.verify_at(&issued.token, NOW + 5),
            Err(VerifyError::Expired)
        ));
    }
}
