//! Domain model: rooms, bookings, and directory records.
//!
//! Identifiers are server-generated UUID newtypes. Create payloads carry no
//! id field at all, so a client-supplied id is stripped by construction
//! rather than by sanitization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub Uuid);

impl RoomId {
    /// Generate a fresh room id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub Uuid);

impl BookingId {
    /// Generate a fresh booking id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Permission role granted by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Browses and books rooms.
    Guest,
    /// Lists and manages rooms.
    Host,
    /// Approves role changes.
    Admin,
}

impl Role {
    /// Stable string form, matching the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Host => "host",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval status of a directory record.
///
/// A user starts at `None`, may self-request an upgrade (`Requested`), and is
/// moved to `Verified` when an admin grants the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ApprovalStatus {
    /// No pending or granted request.
    #[serde(rename = "none")]
    #[default]
    None,
    /// The user asked for a role upgrade.
    #[serde(rename = "Requested")]
    Requested,
    /// An admin approved the request.
    #[serde(rename = "verified")]
    Verified,
}

impl ApprovalStatus {
    /// Stable string form, matching the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Requested => "Requested",
            Self::Verified => "verified",
        }
    }
}

/// A user in the role directory.
///
/// Email is the unique key. Records are created on first login and never
/// deleted; the role stays absent until an admin grants one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Email address (unique key).
    pub email: String,

    /// Display name.
    pub name: Option<String>,

    /// Granted role, absent until an admin approves one.
    pub role: Option<Role>,

    /// Role-request approval status.
    pub status: ApprovalStatus,

    /// When the admin approved the role.
    pub approved_at: Option<DateTime<Utc>>,
}

/// A listed room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Server-generated id.
    pub id: RoomId,

    /// Listing title.
    pub title: String,

    /// Browse category.
    pub category: String,

    /// Nightly price in the marketplace's minor currency unit.
    pub price_per_night: i64,

    /// Owning host's email.
    pub host_email: String,

    /// Owning host's display name.
    pub host_name: Option<String>,

    /// Availability flag: `true` iff an active booking references this room.
    pub is_booked: bool,

    /// When the listing was created.
    pub created_at: DateTime<Utc>,
}

/// A booking in the ledger.
///
/// Deletion is the terminal state; no cancelled marker is retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Server-generated id.
    pub id: BookingId,

    /// Booked room.
    pub room_id: RoomId,

    /// Guest who booked.
    pub guest_email: String,

    /// Host who owns the room.
    pub host_email: String,

    /// Agreed price in the marketplace's minor currency unit.
    pub price: i64,

    /// Date being booked.
    pub booking_date: DateTime<Utc>,

    /// When the booking record was written.
    pub created_at: DateTime<Utc>,
}

/// Command: create a room listing.
///
/// The availability flag always initializes to `false` (available).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoom {
    /// Listing title.
    pub title: String,
    /// Browse category.
    pub category: String,
    /// Nightly price.
    pub price_per_night: i64,
    /// Owning host's email.
    pub host_email: String,
    /// Owning host's display name.
    pub host_name: Option<String>,
}

/// Command: full edit of a room listing.
///
/// Keyed by id *and* host email — a non-owner's update reads as zero
/// affected. Editing implies re-listing, so availability resets to `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRoom {
    /// Room to edit.
    pub id: RoomId,
    /// Requesting host (must own the room).
    pub host_email: String,
    /// New title.
    pub title: String,
    /// New category.
    pub category: String,
    /// New nightly price.
    pub price_per_night: i64,
}

/// Command: create a booking record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBooking {
    /// Room being booked.
    pub room_id: RoomId,
    /// Booking guest.
    pub guest_email: String,
    /// Room's host.
    pub host_email: String,
    /// Agreed price.
    pub price: i64,
    /// Date being booked.
    pub booking_date: DateTime<Utc>,
}

/// Command: upsert a directory record.
///
/// First login inserts a fresh record. An existing record combined with
/// `status = Requested` updates the status only; any other payload against an
/// existing record leaves it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertUser {
    /// Email address (unique key).
    pub email: String,
    /// Display name, stored on first insert.
    pub name: Option<String>,
    /// Requested approval status, if any.
    pub status: Option<ApprovalStatus>,
}
