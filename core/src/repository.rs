//! Repository contracts for the persistent stores.
//!
//! These traits are **interfaces**, not implementations: PostgreSQL adapters
//! live in `stayhub-postgres`, deterministic in-memory ones in
//! `stayhub-testing`. Handlers and the [`crate::BookingService`] only ever
//! see `Arc<dyn …>`.
//!
//! Mutations that target a specific record return the affected-count instead
//! of failing on a missing id — callers check the count, they do not assume
//! success.

use crate::error::Result;
use crate::model::{
    Booking, BookingId, CreateBooking, CreateRoom, Role, Room, RoomId, UpdateRoom, UpsertUser,
    UserRecord,
};
use async_trait::async_trait;

/// Persistent room records with the availability flag.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Create a room listing with `is_booked = false`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the write is rejected.
    async fn create(&self, cmd: CreateRoom) -> Result<Room>;

    /// Fetch a room by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the read fails.
    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>>;

    /// Public browse listing: only rooms with `is_booked = false`, optionally
    /// narrowed to one category.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the read fails.
    async fn list_available(&self, category: Option<&str>) -> Result<Vec<Room>>;

    /// All rooms owned by a host, regardless of availability.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the read fails.
    async fn list_by_host(&self, host_email: &str) -> Result<Vec<Room>>;

    /// Full edit, keyed by id and owner; resets `is_booked` to `false`.
    /// Returns the affected-count (0 on a missing id or wrong owner).
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the write is rejected.
    async fn update(&self, cmd: UpdateRoom) -> Result<u64>;

    /// Delete, keyed by id and owner. Returns the affected-count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the write is rejected.
    async fn delete(&self, id: RoomId, host_email: &str) -> Result<u64>;

    /// Set the availability flag unconditionally. Returns the affected-count
    /// (0 on a missing id).
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the write is rejected.
    async fn set_booked(&self, id: RoomId, booked: bool) -> Result<u64>;

    /// Atomically claim the room: flip `is_booked` from `false` to `true`.
    ///
    /// Returns `true` iff this caller won the claim. A room that is missing
    /// or already booked yields `false` — of two concurrent claims exactly
    /// one observes `true`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the write is rejected.
    async fn claim(&self, id: RoomId) -> Result<bool>;
}

/// The booking ledger: a plain keyed store of booking records.
///
/// The ledger performs no validation that the referenced room exists or is
/// available — that is the lifecycle manager's responsibility on the create
/// path.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Append a booking record with a server-generated id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the write is rejected.
    async fn create(&self, cmd: CreateBooking) -> Result<Booking>;

    /// Bookings made by a guest.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the read fails.
    async fn list_by_guest(&self, guest_email: &str) -> Result<Vec<Booking>>;

    /// Bookings against a host's rooms.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the read fails.
    async fn list_by_host(&self, host_email: &str) -> Result<Vec<Booking>>;

    /// Delete a booking record. Returns the affected-count (0 on a missing
    /// id).
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the write is rejected.
    async fn delete(&self, id: BookingId) -> Result<u64>;
}

/// The role directory: authoritative email → role mapping.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Upsert semantics of first login / role request; see
    /// [`crate::model::UpsertUser`]. Returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the write is rejected.
    async fn upsert(&self, cmd: UpsertUser) -> Result<UserRecord>;

    /// Look up a record by email.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the read fails.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Admin grant: set the role, mark the record verified, stamp the
    /// approval time. Returns the affected-count (0 on a missing email).
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the write is rejected.
    async fn grant_role(&self, email: &str, role: Role) -> Result<u64>;

    /// Every record in the directory.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Store`] if the read fails.
    async fn list_all(&self) -> Result<Vec<UserRecord>>;
}
