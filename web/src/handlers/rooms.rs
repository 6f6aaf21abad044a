//! Room listing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use stayhub_core::{CreateRoom, Room, RoomId, UpdateRoom};

use crate::error::AppError;
use crate::extractors::{AuthenticatedUser, HostUser};
use crate::handlers::MutationResponse;
use crate::state::AppState;

/// Query filter for the public browse listing.
#[derive(Debug, Deserialize)]
pub struct RoomFilter {
    /// Narrow to one category; absent means all categories.
    pub category: Option<String>,
}

/// `POST /rooms` — create a listing. Rooms always start available.
pub async fn create_room(
    State(state): State<AppState>,
    Json(cmd): Json<CreateRoom>,
) -> Result<(StatusCode, Json<Room>), AppError> {
    let room = state.rooms.create(cmd).await?;
    tracing::info!(room_id = %room.id, host = %room.host_email, "room listed");
    Ok((StatusCode::CREATED, Json(room)))
}

/// `GET /rooms` — public browse listing: available rooms only.
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(filter): Query<RoomFilter>,
) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = state
        .rooms
        .list_available(filter.category.as_deref())
        .await?;
    Ok(Json(rooms))
}

/// `GET /rooms/:id` — room detail, 404 on a missing id.
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<RoomId>,
) -> Result<Json<Room>, AppError> {
    let room = state
        .rooms
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Room", id))?;
    Ok(Json(room))
}

/// `GET /rooms/host/:email` — a host's own rooms, booked or not.
pub async fn host_rooms(
    HostUser(claims): HostUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Room>>, AppError> {
    if claims.sub != email {
        return Err(AppError::forbidden("forbidden access"));
    }
    Ok(Json(state.rooms.list_by_host(&email).await?))
}

/// Full-edit body; the owner comes from the credential, never the payload.
#[derive(Debug, Deserialize)]
pub struct EditRoomRequest {
    /// New title.
    pub title: String,
    /// New category.
    pub category: String,
    /// New nightly price.
    pub price_per_night: i64,
}

/// `PATCH /rooms/:id` — full edit, keyed by id and the caller's email.
///
/// Editing re-lists the room, so the availability flag resets in the same
/// write. A non-owner's edit reads as zero affected.
pub async fn update_room(
    HostUser(claims): HostUser,
    State(state): State<AppState>,
    Path(id): Path<RoomId>,
    Json(body): Json<EditRoomRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let affected = state
        .rooms
        .update(UpdateRoom {
            id,
            host_email: claims.sub,
            title: body.title,
            category: body.category,
            price_per_night: body.price_per_night,
        })
        .await?;
    Ok(Json(MutationResponse { affected }))
}

/// `DELETE /rooms/:id` — delete, keyed by id and the caller's email.
pub async fn delete_room(
    HostUser(claims): HostUser,
    State(state): State<AppState>,
    Path(id): Path<RoomId>,
) -> Result<Json<MutationResponse>, AppError> {
    let affected = state.rooms.delete(id, &claims.sub).await?;
    Ok(Json(MutationResponse { affected }))
}

/// Availability-flag update body.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    /// New value of the flag: `true` marks the room booked.
    pub status: bool,
}

/// `PATCH /update-status/:id` — direct availability-flag write.
///
/// Also the recovery path for a room stuck in the orphaned-unavailable state
/// after a half-completed cancel.
pub async fn update_status(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<RoomId>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let affected = state.lifecycle.set_room_status(id, body.status).await?;
    Ok(Json(MutationResponse { affected }))
}
