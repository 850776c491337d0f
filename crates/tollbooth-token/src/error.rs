//! Error types for the token crate.

use thiserror::Error;

/// Errors that can occur while loading keys or issuing tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Failed to generate a keypair.
    #[error("failed to generate keypair: {0}")]
    KeyGenerationFailed(String),

    /// Failed to parse the private key.
    #[error("failed to parse private key: {0}")]
    InvalidPrivateKey(String),

    /// Failed to derive PEM encodings from the loaded key.
    #[error("failed to encode key material: {0}")]
    KeyEncodingFailed(String),

    /// No private key source yielded material at startup.
    #[error("no signing key material configured (set a key file or the private key environment variable)")]
    MissingKeyMaterial,

    /// Failed to sign a token.
    #[error("failed to sign token: {0}")]
    SigningFailed(String),

    /// IO error (reading/writing key files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Classified verification failures, one per verification step.
///
/// The variants mirror the fixed check order: a token that fails an early
/// step is never inspected further, so no claim data leaks from a token
/// whose signature did not verify.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// No token was presented.
    #[error("token is missing")]
    MissingToken,

    /// The token header could not be decoded.
    #[error("cannot read token header: {0}")]
    MalformedToken(String),

    /// Signature, algorithm or key-id check failed.
    #[error("signature verification failed: {0}")]
    InvalidSignature(String),

    /// A required claim is absent, or present with the wrong JSON type.
    #[error("required claim missing or malformed: {0}")]
    MissingClaims(String),

    /// The token expired (past `exp` plus leeway).
    #[error("token has expired")]
    Expired,

    /// The token is not yet valid (`nbf` beyond now plus leeway).
    #[error("token is not yet valid")]
    NotYetValid,

    /// The `iss` claim does not match the expected issuer.
    #[error("iss mismatch")]
    IssuerMismatch,

    /// The `aud` claim does not match the expected audience.
    #[error("aud mismatch")]
    AudienceMismatch,
}
