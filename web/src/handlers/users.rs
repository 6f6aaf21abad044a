//! Role directory handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use stayhub_core::{Role, UpsertUser, UserRecord};

use crate::error::AppError;
use crate::extractors::{AdminUser, AuthenticatedUser};
use crate::handlers::MutationResponse;
use crate::state::AppState;

/// `PUT /users` — first-login upsert / role request.
///
/// A fresh email inserts a record with no role. An existing record combined
/// with `status = "Requested"` updates the status only; any other payload
/// against an existing record leaves it untouched.
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(cmd): Json<UpsertUser>,
) -> Result<Json<UserRecord>, AppError> {
    let record = state.users.upsert(cmd).await?;
    Ok(Json(record))
}

/// `GET /users` — the whole directory, admin only.
pub async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRecord>>, AppError> {
    Ok(Json(state.users.list_all().await?))
}

/// Role lookup response.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    /// Granted role; `null` until an admin approves one.
    pub role: Option<Role>,
}

/// `GET /role/:email` — granted role of an email, absent records included.
pub async fn get_role(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<RoleResponse>, AppError> {
    let record = state.users.find_by_email(&email).await?;
    Ok(Json(RoleResponse {
        role: record.and_then(|r| r.role),
    }))
}

/// Admin grant body.
#[derive(Debug, Deserialize)]
pub struct GrantRoleRequest {
    /// Role to grant.
    pub role: Role,
}

/// `PATCH /users/:email` — admin grant: set the role, mark the record
/// verified, stamp the approval time. Missing email reads as zero affected.
pub async fn update_role(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(body): Json<GrantRoleRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let affected = state.users.grant_role(&email, body.role).await?;
    tracing::info!(email = %email, role = %body.role, affected, "role grant");
    Ok(Json(MutationResponse { affected }))
}
