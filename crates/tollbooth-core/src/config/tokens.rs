//! Token issuance and verification settings.

use serde::{Deserialize, Serialize};

/// Settings shared by the token issuer and verifier.
///
/// Issuer and verifier must agree on every field, so one value is built at
/// startup and handed to both. The defaults are the service's fixed
/// constants; tests substitute shorter lifetimes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSettings {
    /// `iss` claim stamped into and required from every token.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// `aud` claim stamped into and required from every token.
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Token validity window in seconds (`exp - iat`).
    #[serde(default = "default_lifetime_secs")]
    pub lifetime_secs: i64,

    /// Clock-skew allowance in seconds, applied to `exp`/`nbf` checks and
    /// subtracted from `iat` to form `nbf`.
    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: i64,
}

fn default_issuer() -> String {
    "JWT API Simulation".to_string()
}

fn default_audience() -> String {
    "JWT API Simulation".to_string()
}

fn default_lifetime_secs() -> i64 {
    30
}

fn default_leeway_secs() -> i64 {
    2
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            audience: default_audience(),
            lifetime_secs: default_lifetime_secs(),
            leeway_secs: default_leeway_secs(),
        }
    }
}
