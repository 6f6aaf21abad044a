//! In-memory repository implementations.
//!
//! Deterministic `Arc<Mutex<HashMap>>` stores implementing the
//! `stayhub-core` repository traits, for unit and integration tests that
//! should run at memory speed with no database.
//!
//! Cloning any store shares the underlying map, so a test can hold a handle
//! for assertions while the handlers mutate the same data.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use stayhub_core::{
    ApprovalStatus, Booking, BookingId, BookingRepository, CreateBooking, CreateRoom, DomainError,
    Result, Role, Room, RoomId, RoomRepository, UpdateRoom, UpsertUser, UserRecord, UserRepository,
};

fn locked<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| DomainError::Store("lock poisoned".to_string()))
}

/// In-memory room availability store.
#[derive(Debug, Clone, Default)]
pub struct MemoryRooms {
    rooms: Arc<Mutex<HashMap<RoomId, Room>>>,
}

impl MemoryRooms {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read of a room's flag, for assertions.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Store`] if the lock is poisoned.
    pub fn flag_of(&self, id: RoomId) -> Result<Option<bool>> {
        Ok(locked(&self.rooms)?.get(&id).map(|r| r.is_booked))
    }
}

#[async_trait]
impl RoomRepository for MemoryRooms {
    async fn create(&self, cmd: CreateRoom) -> Result<Room> {
        let room = Room {
            id: RoomId::new(),
            title: cmd.title,
            category: cmd.category,
            price_per_night: cmd.price_per_night,
            host_email: cmd.host_email,
            host_name: cmd.host_name,
            is_booked: false,
            created_at: Utc::now(),
        };
        locked(&self.rooms)?.insert(room.id, room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>> {
        Ok(locked(&self.rooms)?.get(&id).cloned())
    }

    async fn list_available(&self, category: Option<&str>) -> Result<Vec<Room>> {
        let mut rooms: Vec<Room> = locked(&self.rooms)?
            .values()
            .filter(|r| !r.is_booked)
            .filter(|r| category.is_none_or(|c| r.category == c))
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(rooms)
    }

    async fn list_by_host(&self, host_email: &str) -> Result<Vec<Room>> {
        let mut rooms: Vec<Room> = locked(&self.rooms)?
            .values()
            .filter(|r| r.host_email == host_email)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(rooms)
    }

    async fn update(&self, cmd: UpdateRoom) -> Result<u64> {
        let mut rooms = locked(&self.rooms)?;
        match rooms.get_mut(&cmd.id) {
            Some(room) if room.host_email == cmd.host_email => {
                room.title = cmd.title;
                room.category = cmd.category;
                room.price_per_night = cmd.price_per_night;
                room.is_booked = false;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete(&self, id: RoomId, host_email: &str) -> Result<u64> {
        let mut rooms = locked(&self.rooms)?;
        match rooms.get(&id) {
            Some(room) if room.host_email == host_email => {
                rooms.remove(&id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn set_booked(&self, id: RoomId, booked: bool) -> Result<u64> {
        let mut rooms = locked(&self.rooms)?;
        match rooms.get_mut(&id) {
            Some(room) => {
                room.is_booked = booked;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn claim(&self, id: RoomId) -> Result<bool> {
        let mut rooms = locked(&self.rooms)?;
        match rooms.get_mut(&id) {
            Some(room) if !room.is_booked => {
                room.is_booked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// In-memory booking ledger.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookings {
    bookings: Arc<Mutex<HashMap<BookingId, Booking>>>,
}

impl MemoryBookings {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in the ledger, for assertions.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Store`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(locked(&self.bookings)?.len())
    }

    /// Whether the ledger is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Store`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(locked(&self.bookings)?.is_empty())
    }
}

#[async_trait]
impl BookingRepository for MemoryBookings {
    async fn create(&self, cmd: CreateBooking) -> Result<Booking> {
        let booking = Booking {
            id: BookingId::new(),
            room_id: cmd.room_id,
            guest_email: cmd.guest_email,
            host_email: cmd.host_email,
            price: cmd.price,
            booking_date: cmd.booking_date,
            created_at: Utc::now(),
        };
        locked(&self.bookings)?.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn list_by_guest(&self, guest_email: &str) -> Result<Vec<Booking>> {
        let mut found: Vec<Booking> = locked(&self.bookings)?
            .values()
            .filter(|b| b.guest_email == guest_email)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(found)
    }

    async fn list_by_host(&self, host_email: &str) -> Result<Vec<Booking>> {
        let mut found: Vec<Booking> = locked(&self.bookings)?
            .values()
            .filter(|b| b.host_email == host_email)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(found)
    }

    async fn delete(&self, id: BookingId) -> Result<u64> {
        Ok(u64::from(locked(&self.bookings)?.remove(&id).is_some()))
    }
}

/// In-memory role directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryUsers {
    users: Arc<Mutex<HashMap<String, UserRecord>>>,
}

impl MemoryUsers {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record with a granted role, bypassing the admin flow. Test
    /// setup only.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Store`] if the lock is poisoned.
    pub fn seed_role(&self, email: &str, role: Role) -> Result<()> {
        locked(&self.users)?.insert(
            email.to_string(),
            UserRecord {
                email: email.to_string(),
                name: None,
                role: Some(role),
                status: ApprovalStatus::Verified,
                approved_at: Some(Utc::now()),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn upsert(&self, cmd: UpsertUser) -> Result<UserRecord> {
        let mut users = locked(&self.users)?;
        if let Some(existing) = users.get_mut(&cmd.email) {
            // An existing record only ever takes a status request; anything
            // else is a no-op against the stored state.
            if cmd.status == Some(ApprovalStatus::Requested) {
                existing.status = ApprovalStatus::Requested;
            }
            return Ok(existing.clone());
        }
        let record = UserRecord {
            email: cmd.email.clone(),
            name: cmd.name,
            role: None,
            status: cmd.status.unwrap_or_default(),
            approved_at: None,
        };
        users.insert(cmd.email, record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(locked(&self.users)?.get(email).cloned())
    }

    async fn grant_role(&self, email: &str, role: Role) -> Result<u64> {
        let mut users = locked(&self.users)?;
        match users.get_mut(email) {
            Some(record) => {
                record.role = Some(role);
                record.status = ApprovalStatus::Verified;
                record.approved_at = Some(Utc::now());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>> {
        let mut all: Vec<UserRecord> = locked(&self.users)?.values().cloned().collect();
        all.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(all)
    }
}
