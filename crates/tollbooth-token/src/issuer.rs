//! Token issuance.

use crate::claims::{Claims, JWT_ALGORITHM};
use crate::error::TokenError;
use crate::keys::SigningKey;
use chrono::Utc;
use jsonwebtoken::{Header, encode};
use std::sync::Arc;
use tollbooth_core::TokenSettings;
use uuid::Uuid;

/// A freshly issued token and its expiry timestamp.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The signed compact JWT.
    pub token: String,
    /// `exp` claim, unix seconds.
    pub expires_at: i64,
}

/// Issues short-lived signed tokens.
///
/// Stateless: every call builds a fresh claim set with a unique `jti` and
/// signs it; nothing is recorded server-side.
#[derive(Clone)]
pub struct TokenIssuer {
    key: Arc<SigningKey>,
    settings: TokenSettings,
}

impl TokenIssuer {
    /// Create a new issuer over the process signing key.
    pub fn new(key: Arc<SigningKey>, settings: TokenSettings) -> Self {
        Self { key, settings }
    }

    /// Issue a token for `subject`, anchored at the current time.
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    /// Issue a token anchored at an explicit unix timestamp.
    ///
    /// The expiry is always exactly `lifetime_secs` after `now`, and
    /// `nbf` is `now` minus the leeway, whatever clock the caller brings.
    pub fn issue_at(&self, subject: &str, now: i64) -> Result<IssuedToken, TokenError> {
        let jti = Uuid::new_v4().simple().to_string();
        let claims = Claims {
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            sub: subject.to_string(),
            iat: now,
            nbf: now - self.settings.leeway_secs,
            exp: now + self.settings.lifetime_secs,
            jti: Some(jti.clone()),
        };

        let mut header = Header::new(JWT_ALGORITHM);
        header.kid = Some(self.key.kid().to_string());

        let token = encode(&header, &claims, self.key.encoding_key())
            .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

        tracing::debug!(subject, %jti, exp = claims.exp, "issued token");

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }
}
