//! Error taxonomy for domain and storage operations.

use crate::model::RoomId;
use thiserror::Error;

/// Result type alias for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Failure modes of the booking core.
///
/// Delete and update operations targeting a missing record are *not* errors:
/// they report a zero affected-count and callers are expected to inspect it.
/// This enum covers the cases that genuinely cannot be expressed as a count.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The referenced room does not exist.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// The room's availability claim was lost: another booking already holds
    /// the room, or its flag was flipped between read and claim.
    #[error("room {0} is not available")]
    RoomUnavailable(RoomId),

    /// The cancel sequence half-completed: the booking record was deleted but
    /// the room could not be released and is left marked as booked.
    ///
    /// Callers must surface this rather than report unconditional success —
    /// the room is in the orphaned-unavailable state until the flag is reset
    /// (e.g. via the status-update operation).
    #[error("booking removed but room {room_id} was not released")]
    PartialCancellation {
        /// Room left incorrectly marked as booked.
        room_id: RoomId,
        /// Failure of the release write.
        #[source]
        source: Box<DomainError>,
    },

    /// The persistent store rejected an operation.
    #[error("storage error: {0}")]
    Store(String),
}

impl DomainError {
    /// Returns `true` if this error should map to a conflict at the boundary
    /// (the caller raced another writer and lost).
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::RoomUnavailable(_))
    }

    /// Returns `true` if the stores may be mutually inconsistent after this
    /// error (one of two writes landed).
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::PartialCancellation { .. })
    }
}
