//! # tollbooth-token
//!
//! JWT handling for the Tollbooth short-lived session service.
//!
//! This crate provides functionality for:
//! - Loading an RSA signing keypair from a file or environment source
//! - Publishing the public half as a JWK set for external verifiers
//! - Issuing PS512-signed tokens with a fixed 30-second validity window
//! - Verifying tokens with a pinned algorithm and strict claim checks
//!
//! ## Verification order
//!
//! Verification short-circuits through a fixed sequence: header decode,
//! algorithm and key-id pin, signature, required-claims presence, time
//! window, issuer, audience. A token failing one step never reaches the
//! next, and the accepted algorithm is never taken from the token itself.
//!
//! The signing key is loaded once at startup and never mutated, so one
//! [`SigningKey`] is safely shared read-only across request handlers.

pub mod claims;
pub mod error;
pub mod issuer;
pub mod keys;
pub mod verifier;

pub use claims::{Claims, JWT_ALGORITHM, JWT_ALGORITHM_NAME};
pub use error::{TokenError, VerifyError};
pub use issuer::{IssuedToken, TokenIssuer};
pub use jsonwebtoken::Header;
pub use keys::{Jwk, JwkSet, SigningKey};
pub use verifier::{TokenVerifier, VerifiedToken};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::keys::SigningKey;
    use std::sync::OnceLock;

    /// Shared test key. RSA generation is expensive, so tests that do not
    /// care about key identity reuse this one.
    pub fn signing_key() -> &'static SigningKey {
        static KEY: OnceLock<SigningKey> = OnceLock::new();
        KEY.get_or_init(|| SigningKey::generate(2048).expect("test key generation"))
    }
}
