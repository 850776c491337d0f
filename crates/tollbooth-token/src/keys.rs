//! Signing key material: loading, derivation and the public JWK.

use crate::claims::JWT_ALGORITHM_NAME;
use crate::error::TokenError;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{DecodingKey, EncodingKey};
use rsa::RsaPrivateKey;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tollbooth_core::KeyConfig;
use uuid::Uuid;

/// Public JWK descriptor for the active signing key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type, always "RSA".
    pub kty: String,
    /// Key identifier, matching the `kid` of every issued token header.
    pub kid: String,
    /// Key usage, always "sig".
    #[serde(rename = "use")]
    pub key_use: String,
    /// Algorithm tag, always "PS512".
    pub alg: String,
    /// Modulus, base64url without padding.
    pub n: String,
    /// Public exponent, base64url without padding.
    pub e: String,
}

/// JWK set as served by the discovery endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

/// The process signing key.
///
/// Loaded once at startup and immutable afterwards; all derived forms
/// (PEM encodings, jsonwebtoken keys, JWK parameters, kid) are computed at
/// construction so later reads never touch key parsing again.
#[derive(Clone)]
pub struct SigningKey {
    kid: String,
    private_pem: String,
    public_pem: String,
    jwk_n: String,
    jwk_e: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Load the signing key from the configured sources.
    ///
    /// The file source wins over the inline environment source. No usable
    /// source is a fatal condition for the caller: the service must not
    /// start without a key.
    pub fn load(config: &KeyConfig) -> Result<Self, TokenError> {
        let pem = config
            .resolve_private_key()?
            .ok_or(TokenError::MissingKeyMaterial)?;
        Self::from_private_key_pem(&pem, config.kid.clone())
    }

    /// Build a signing key from a private key PEM (PKCS#8 or PKCS#1).
    ///
    /// When `kid` is `None` a random identifier is generated here, once,
    /// and kept for the life of the value.
    pub fn from_private_key_pem(pem: &str, kid: Option<String>) -> Result<Self, TokenError> {
        let private = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| TokenError::InvalidPrivateKey(e.to_string()))?;
        Self::from_parts(private, kid)
    }

    /// Generate a fresh random keypair (tests and the `keygen` command).
    pub fn generate(bits: usize) -> Result<Self, TokenError> {
        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, bits)
            .map_err(|e| TokenError::KeyGenerationFailed(e.to_string()))?;
        Self::from_parts(private, None)
    }

    fn from_parts(private: RsaPrivateKey, kid: Option<String>) -> Result<Self, TokenError> {
        let private_pem = private
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| TokenError::KeyEncodingFailed(e.to_string()))?
            .to_string();

        let public = private.to_public_key();
        let public_pem = public
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| TokenError::KeyEncodingFailed(e.to_string()))?;

        let encoding = EncodingKey::from_rsa_pem(private_pem.as_bytes())
            .map_err(|e| TokenError::InvalidPrivateKey(e.to_string()))?;
        let decoding = DecodingKey::from_rsa_pem(public_pem.as_bytes())
            .map_err(|e| TokenError::KeyEncodingFailed(e.to_string()))?;

        let kid = kid.unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        Ok(Self {
            kid,
            private_pem,
            public_pem,
            jwk_n: URL_SAFE_NO_PAD.encode(public.n().to_bytes_be()),
            jwk_e: URL_SAFE_NO_PAD.encode(public.e().to_bytes_be()),
            encoding,
            decoding,
        })
    }

    /// Key identifier, constant for the life of this value.
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Private key PEM (PKCS#8), for signing.
    pub fn private_key_pem(&self) -> &str {
        &self.private_pem
    }

    /// Public key PEM (SPKI), for verification.
    pub fn public_key_pem(&self) -> &str {
        &self.public_pem
    }

    /// jsonwebtoken encoding key.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    /// jsonwebtoken decoding key.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }

    /// Public JWK descriptor for the discovery endpoint.
    pub fn public_jwk(&self) -> Jwk {
        Jwk {
            kty: "RSA".to_string(),
            kid: self.kid.clone(),
            key_use: "sig".to_string(),
            alg: JWT_ALGORITHM_NAME.to_string(),
            n: self.jwk_n.clone(),
            e: self.jwk_e.clone(),
        }
    }

    /// The JWK set containing the single active key.
    pub fn jwk_set(&self) -> JwkSet {
        JwkSet {
            keys: vec![self.public_jwk()],
        }
    }

    /// Save the keypair PEMs to files.
    pub fn save_to_files(
        &self,
        private_key_path: &Path,
        public_key_path: &Path,
    ) -> Result<(), TokenError> {
        std::fs::write(private_key_path, &self.private_pem)?;
        std::fs::write(public_key_path, &self.public_pem)?;
        Ok(())
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // private material stays out of debug output
        f.debug_struct("SigningKey").field("kid", &self.kid).finish()
    }
}
