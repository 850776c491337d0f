//! Request handlers.

use crate::error::{self, WebError};
use crate::pages::{self, PageContext};
use crate::session;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tollbooth_token::{JWT_ALGORITHM_NAME, VerifyError};

fn page_context(state: &AppState) -> PageContext {
    PageContext {
        alg: JWT_ALGORITHM_NAME.to_string(),
        kid: state.key().kid().to_string(),
        issuer: state.settings().issuer.clone(),
        audience: state.settings().audience.clone(),
    }
}

/// Issuance page.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(pages::index_page(&page_context(&state)))
}

/// Issue form payload.
#[derive(Debug, Deserialize)]
pub struct IssueForm {
    #[serde(default)]
    pub uid: String,
}

/// Handle the issuance form: mint a token and bind the cookie pair.
///
/// An empty UID is rejected before the issuer is reached and no cookie
/// changes.
pub async fn issue(State(state): State<AppState>, Form(form): Form<IssueForm>) -> Response {
    let uid = form.uid.trim();
    if uid.is_empty() {
        return (StatusCode::BAD_REQUEST, "UID is required").into_response();
    }

    match state.issuer().issue(uid) {
        Ok(issued) => {
            let [session, expiry] =
                session::session_cookies(&issued.token, issued.expires_at, state.settings());
            (
                AppendHeaders([
                    (header::SET_COOKIE, session),
                    (header::SET_COOKIE, expiry),
                ]),
                Redirect::to("/demo"),
            )
                .into_response()
        }
        Err(err) => WebError::from(err).into_response(),
    }
}

/// Demo page, with the countdown seeded from the display cookie.
pub async fn demo(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let exp = session::expiry_from_cookies(&headers);
    Html(pages::demo_page(&page_context(&state), exp))
}

/// The protected endpoint: verify the cookie-borne token.
pub async fn api_ping(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(token) = session::token_from_cookies(&headers) else {
        return error::verify_failure_response(&VerifyError::MissingToken);
    };

    match state.verifier().verify(&token) {
        Ok(verified) => Json(json!({
            "ok": true,
            "message": "Validation successful",
            "now": Utc::now().timestamp(),
            "header": verified.header,
            "claims": verified.claims,
        }))
        .into_response(),
        Err(err) => {
            tracing::debug!(error = %err, "token verification failed");
            error::verify_failure_response(&err)
        }
    }
}

/// Clear both cookies and return to the issuance page.
pub async fn reset() -> Response {
    let [session, expiry] = session::clear_cookies();
    (
        AppendHeaders([
            (header::SET_COOKIE, session),
            (header::SET_COOKIE, expiry),
        ]),
        Redirect::to("/"),
    )
        .into_response()
}

/// JWK discovery endpoint, cacheable for a short interval since the key
/// is stable for the process lifetime.
pub async fn jwks(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "public, max-age=300")],
        Json(state.key().jwk_set()),
    )
}
