//! # tollbooth-core
//!
//! Shared configuration types for the Tollbooth short-lived JWT service.
//!
//! Configuration is loaded from a YAML file (`tollbooth.yaml` by default)
//! and combined with environment variables for secret material. All other
//! crates consume the types defined here instead of reading ambient state,
//! so the token engine can be exercised with substituted settings in tests.

pub mod config;

pub use config::{AppConfig, ConfigError, KeyConfig, TokenSettings, WebConfig};
