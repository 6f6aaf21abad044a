//! The booking lifecycle manager.
//!
//! A (room, booking) pair moves through exactly two transitions:
//!
//! ```text
//! Available ──create──▶ Booked ──cancel──▶ Available
//! (flag false,          (flag true,         (flag false,
//!  no booking)           one booking)        no booking)
//! ```
//!
//! Both transitions touch two stores with no spanning transaction. The create
//! path is guarded by an atomic claim on the room's availability flag, so
//! concurrent bookings of the same room resolve to one winner. The cancel
//! path keeps the original booking-delete-then-room-release ordering and
//! surfaces a half-completed sequence instead of swallowing it.

use crate::error::{DomainError, Result};
use crate::model::{Booking, BookingId, CreateBooking, RoomId};
use crate::repository::{BookingRepository, RoomRepository};
use serde::Serialize;
use std::sync::Arc;

/// Combined result of the two cancel writes.
///
/// Callers inspect both counts; either can be zero when the target id was
/// already gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CancelOutcome {
    /// Booking records deleted (0 or 1).
    pub bookings_deleted: u64,
    /// Room records whose flag was reset (0 or 1).
    pub rooms_released: u64,
}

/// Coordinates the room availability store and the booking ledger.
///
/// Repositories are injected at construction; the service holds no state of
/// its own and re-reads the stores on every call.
#[derive(Clone)]
pub struct BookingService {
    rooms: Arc<dyn RoomRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl BookingService {
    /// Create a lifecycle manager over the given stores.
    #[must_use]
    pub fn new(rooms: Arc<dyn RoomRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { rooms, bookings }
    }

    /// Create a booking: claim the room, then append the ledger record.
    ///
    /// The claim is a compare-and-swap on the availability flag, so a room
    /// that is already booked rejects the request with
    /// [`DomainError::RoomUnavailable`] instead of racing. If the ledger
    /// write fails after a successful claim, the claim is released before the
    /// error propagates; a failed release is logged and leaves the room in
    /// the orphaned-unavailable state.
    ///
    /// # Errors
    ///
    /// - [`DomainError::RoomNotFound`] if the room id resolves to nothing.
    /// - [`DomainError::RoomUnavailable`] if the claim was lost.
    /// - [`DomainError::Store`] if either store rejects a write.
    pub async fn create_booking(&self, cmd: CreateBooking) -> Result<Booking> {
        let room_id = cmd.room_id;
        if self.rooms.find_by_id(room_id).await?.is_none() {
            return Err(DomainError::RoomNotFound(room_id));
        }

        if !self.rooms.claim(room_id).await? {
            tracing::debug!(room_id = %room_id, "booking rejected, claim lost");
            return Err(DomainError::RoomUnavailable(room_id));
        }

        match self.bookings.create(cmd).await {
            Ok(booking) => {
                tracing::info!(
                    booking_id = %booking.id,
                    room_id = %room_id,
                    guest = %booking.guest_email,
                    "booking created"
                );
                Ok(booking)
            }
            Err(err) => {
                // Roll the claim back so the room does not stay blocked by a
                // booking that was never written.
                if let Err(release_err) = self.rooms.set_booked(room_id, false).await {
                    tracing::error!(
                        room_id = %room_id,
                        error = %release_err,
                        "claim rollback failed, room left marked booked"
                    );
                }
                Err(err)
            }
        }
    }

    /// Cancel a booking: delete the ledger record, then release the room.
    ///
    /// Ordering is booking-delete-then-room-release. The two outcomes are
    /// returned together so a caller can see a zero count on either side.
    ///
    /// # Errors
    ///
    /// - [`DomainError::PartialCancellation`] if the delete landed but the
    ///   release failed — the room is left in the orphaned-unavailable state
    ///   and the error names it.
    /// - [`DomainError::Store`] if the delete itself fails.
    pub async fn cancel_booking(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> Result<CancelOutcome> {
        let bookings_deleted = self.bookings.delete(booking_id).await?;

        match self.rooms.set_booked(room_id, false).await {
            Ok(rooms_released) => {
                tracing::info!(
                    booking_id = %booking_id,
                    room_id = %room_id,
                    bookings_deleted,
                    rooms_released,
                    "booking cancelled"
                );
                Ok(CancelOutcome {
                    bookings_deleted,
                    rooms_released,
                })
            }
            Err(source) if bookings_deleted > 0 => {
                tracing::warn!(
                    booking_id = %booking_id,
                    room_id = %room_id,
                    "cancel half-completed, room left marked booked"
                );
                Err(DomainError::PartialCancellation {
                    room_id,
                    source: Box::new(source),
                })
            }
            Err(source) => Err(source),
        }
    }

    /// Direct availability-flag update, used by the explicit status-update
    /// operation. Returns the affected-count (0 on a missing room id).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Store`] if the write is rejected.
    pub async fn set_room_status(&self, room_id: RoomId, booked: bool) -> Result<u64> {
        self.rooms.set_booked(room_id, booked).await
    }
}
