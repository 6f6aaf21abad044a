//! Credential issue and logout.
//!
//! Token issue is a pure signing operation keyed by the submitted email;
//! nothing is stored. Identity verification happens upstream (the client
//! authenticates against its identity provider before asking for a token),
//! so possession of the cookie is what the rest of the API trusts.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::TOKEN_COOKIE;
use crate::state::AppState;

/// Token issue body.
#[derive(Debug, Deserialize)]
pub struct IssueTokenRequest {
    /// Subject email to assert.
    pub email: String,
}

/// Acknowledgement body for session operations.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    /// Always `true`; failures surface as error responses.
    pub success: bool,
}

/// `POST /jwt` — sign a credential and set it as an HTTP-only cookie.
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<IssueTokenRequest>,
) -> Result<(CookieJar, Json<AckResponse>), AppError> {
    let token = state.tokens.issue(&req.email)?;
    let cookie = Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(state.environment.cookie_secure())
        .same_site(state.environment.cookie_same_site())
        .build();
    tracing::debug!(email = %req.email, "credential issued");
    Ok((jar.add(cookie), Json(AckResponse { success: true })))
}

/// `GET /logout` — clear the credential cookie.
///
/// Purely client-side state removal: issued tokens stay valid until expiry,
/// there is no server-side session to destroy.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<AckResponse>) {
    let removal = Cookie::build((TOKEN_COOKIE, "")).path("/").build();
    (jar.remove(removal), Json(AckResponse { success: true }))
}
