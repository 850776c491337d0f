//! Web application state.

use std::sync::Arc;
use tollbooth_core::TokenSettings;
use tollbooth_token::{SigningKey, TokenIssuer, TokenVerifier};

/// Shared application state.
///
/// Everything in here is immutable after startup: the signing key has no
/// writers once loaded, so the state is shared read-only across handlers
/// without any locking.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    key: Arc<SigningKey>,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    settings: TokenSettings,
}

impl AppState {
    /// Build the state from the loaded signing key and token settings.
    pub fn new(key: SigningKey, settings: TokenSettings) -> Self {
        let key = Arc::new(key);
        let issuer = TokenIssuer::new(Arc::clone(&key), settings.clone());
        let verifier = TokenVerifier::new(&key, settings.clone());

        Self {
            inner: Arc::new(AppStateInner {
                key,
                issuer,
                verifier,
                settings,
            }),
        }
    }

    /// The process signing key.
    pub fn key(&self) -> &SigningKey {
        &self.inner.key
    }

    /// The token issuer.
    pub fn issuer(&self) -> &TokenIssuer {
        &self.inner.issuer
    }

    /// The token verifier.
    pub fn verifier(&self) -> &TokenVerifier {
        &self.inner.verifier
    }

    /// The shared token settings.
    pub fn settings(&self) -> &TokenSettings {
        &self.inner.settings
    }
}
