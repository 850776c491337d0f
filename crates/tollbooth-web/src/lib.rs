//! # tollbooth-web
//!
//! The HTTP surface of the Tollbooth JWT service:
//! - Issuance page and form handler (sets the session cookie pair)
//! - Demo page with the client-side countdown
//! - Protected `/api/ping` endpoint validating the cookie-borne token
//! - Cookie reset
//! - JWK discovery at `/.well-known/jwks.json`
//!
//! The token itself only ever lives in an HttpOnly cookie; the companion
//! display cookie carries the bare expiry timestamp and no authority.

pub mod error;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;

pub use error::WebError;
pub use routes::create_router;
pub use server::WebServer;
pub use state::AppState;
