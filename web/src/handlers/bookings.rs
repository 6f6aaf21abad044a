//! Booking lifecycle handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use stayhub_core::{Booking, BookingId, CancelOutcome, CreateBooking, RoomId};

use crate::error::AppError;
use crate::extractors::{AuthenticatedUser, HostUser};
use crate::state::AppState;

/// Booking request body; the guest is the credential subject, never a
/// payload field.
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    /// Room being booked.
    pub room_id: RoomId,
    /// Room's host.
    pub host_email: String,
    /// Agreed price.
    pub price: i64,
    /// Date being booked.
    pub booking_date: DateTime<Utc>,
}

/// `POST /bookings` — book a room.
///
/// Rejects with 409 when the room's availability claim is lost: of two
/// concurrent requests for the same room, exactly one gets 201.
pub async fn create_booking(
    AuthenticatedUser(claims): AuthenticatedUser,
    State(state): State<AppState>,
    Json(body): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state
        .lifecycle
        .create_booking(CreateBooking {
            room_id: body.room_id,
            guest_email: claims.sub,
            host_email: body.host_email,
            price: body.price,
            booking_date: body.booking_date,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Cancel body, naming the room whose flag is to be released.
#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    /// Room referenced by the booking.
    #[serde(rename = "roomId")]
    pub room_id: RoomId,
}

/// `POST /manage/my-bookings/:id` — cancel a booking.
///
/// Returns both affected-counts; either can be zero when the target was
/// already gone. A delete that lands while the release fails surfaces as a
/// 500 with code `PARTIAL_CANCELLATION` instead of reporting success.
pub async fn cancel_booking(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<BookingId>,
    Json(body): Json<CancelRequest>,
) -> Result<Json<CancelOutcome>, AppError> {
    let outcome = state.lifecycle.cancel_booking(id, body.room_id).await?;
    Ok(Json(outcome))
}

/// `GET /my-booking/:email` — a guest's own bookings.
pub async fn my_bookings(
    AuthenticatedUser(claims): AuthenticatedUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Booking>>, AppError> {
    if claims.sub != email {
        return Err(AppError::forbidden("forbidden access"));
    }
    Ok(Json(state.bookings.list_by_guest(&email).await?))
}

/// `GET /manage-booking/:email` — bookings against a host's rooms.
pub async fn host_bookings(
    HostUser(claims): HostUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Booking>>, AppError> {
    if claims.sub != email {
        return Err(AppError::forbidden("forbidden access"));
    }
    Ok(Json(state.bookings.list_by_host(&email).await?))
}
