//! Authorization guards as extractors.
//!
//! Three tiers, each a plain extractor argument on the handlers it guards:
//!
//! - [`AuthenticatedUser`] — a valid credential was presented; yields the
//!   claims. No directory lookup.
//! - [`HostUser`] / [`AdminUser`] — authenticated *and* the role directory
//!   maps the subject email to the required role right now. Revoking a role
//!   takes effect on the next request; credentials are never re-issued.
//!
//! The credential is read from the `token` cookie first, then from an
//! `Authorization: Bearer` header.

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use stayhub_auth::{AuthError, Claims};
use stayhub_core::Role;

use crate::error::AppError;
use crate::state::AppState;

/// Name of the HTTP-only credential cookie.
pub const TOKEN_COOKIE: &str = "token";

fn credential_from(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        return Some(cookie.value().to_string());
    }
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

async fn require_role(state: &AppState, email: &str, required: Role) -> Result<(), AppError> {
    let record = state
        .users
        .find_by_email(email)
        .await
        .map_err(|e| AuthError::Directory(e.to_string()))?;
    match record.and_then(|r| r.role) {
        Some(role) if role == required => Ok(()),
        _ => Err(AuthError::Forbidden {
            required: required.as_str().to_string(),
        }
        .into()),
    }
}

/// A caller holding a valid credential.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        let credential = credential_from(parts).ok_or(AuthError::MissingCredential)?;
        let claims = app.tokens.validate(&credential)?;
        Ok(Self(claims))
    }
}

/// An authenticated caller whose directory record grants the host role.
#[derive(Debug, Clone)]
pub struct HostUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for HostUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(claims) = AuthenticatedUser::from_request_parts(parts, state).await?;
        let app = AppState::from_ref(state);
        require_role(&app, &claims.sub, Role::Host).await?;
        Ok(Self(claims))
    }
}

/// An authenticated caller whose directory record grants the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(claims) = AuthenticatedUser::from_request_parts(parts, state).await?;
        let app = AppState::from_ref(state);
        require_role(&app, &claims.sub, Role::Admin).await?;
        Ok(Self(claims))
    }
}
