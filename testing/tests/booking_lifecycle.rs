//! Lifecycle tests for the booking state machine over in-memory stores.

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use stayhub_core::{
    BookingService, CreateBooking, CreateRoom, DomainError, Result, Room, RoomId, RoomRepository,
    UpdateRoom,
};
use stayhub_testing::{MemoryBookings, MemoryRooms};

fn booking_for(room_id: RoomId, guest: &str) -> CreateBooking {
    CreateBooking {
        room_id,
        guest_email: guest.to_string(),
        host_email: "host@example.com".to_string(),
        price: 100,
        booking_date: Utc::now(),
    }
}

async fn listed_room(rooms: &MemoryRooms) -> Room {
    rooms
        .create(CreateRoom {
            title: "Seaside loft".to_string(),
            category: "loft".to_string(),
            price_per_night: 100,
            host_email: "host@example.com".to_string(),
            host_name: Some("Hoda".to_string()),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn create_booking_claims_the_room() {
    let rooms = MemoryRooms::new();
    let bookings = MemoryBookings::new();
    let service = BookingService::new(Arc::new(rooms.clone()), Arc::new(bookings.clone()));

    let room = listed_room(&rooms).await;
    let booking = service.create_booking(booking_for(room.id, "g@example.com")).await.unwrap();

    assert_eq!(booking.room_id, room.id);
    assert_eq!(rooms.flag_of(room.id).unwrap(), Some(true));
    assert_eq!(bookings.len().unwrap(), 1);
}

#[tokio::test]
async fn booked_room_rejects_a_second_booking() {
    let rooms = MemoryRooms::new();
    let bookings = MemoryBookings::new();
    let service = BookingService::new(Arc::new(rooms.clone()), Arc::new(bookings.clone()));

    let room = listed_room(&rooms).await;
    service.create_booking(booking_for(room.id, "first@example.com")).await.unwrap();

    let err = service
        .create_booking(booking_for(room.id, "second@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RoomUnavailable(id) if id == room.id));
    // The loser wrote nothing.
    assert_eq!(bookings.len().unwrap(), 1);
}

#[tokio::test]
async fn concurrent_bookings_resolve_to_one_winner() {
    let rooms = MemoryRooms::new();
    let bookings = MemoryBookings::new();
    let service = BookingService::new(Arc::new(rooms.clone()), Arc::new(bookings.clone()));

    let room = listed_room(&rooms).await;
    let (a, b) = tokio::join!(
        service.create_booking(booking_for(room.id, "alice@example.com")),
        service.create_booking(booking_for(room.id, "bob@example.com")),
    );

    assert_eq!(
        usize::from(a.is_ok()) + usize::from(b.is_ok()),
        1,
        "exactly one claim must win"
    );
    assert_eq!(bookings.len().unwrap(), 1);
    assert_eq!(rooms.flag_of(room.id).unwrap(), Some(true));
}

#[tokio::test]
async fn booking_a_missing_room_is_not_found() {
    let rooms = MemoryRooms::new();
    let service = BookingService::new(Arc::new(rooms), Arc::new(MemoryBookings::new()));

    let ghost = RoomId::new();
    let err = service.create_booking(booking_for(ghost, "g@example.com")).await.unwrap_err();
    assert!(matches!(err, DomainError::RoomNotFound(id) if id == ghost));
}

#[tokio::test]
async fn cancel_reverses_both_records() {
    let rooms = MemoryRooms::new();
    let bookings = MemoryBookings::new();
    let service = BookingService::new(Arc::new(rooms.clone()), Arc::new(bookings.clone()));

    let room = listed_room(&rooms).await;
    let booking = service.create_booking(booking_for(room.id, "g@example.com")).await.unwrap();

    let outcome = service.cancel_booking(booking.id, room.id).await.unwrap();
    assert_eq!(outcome.bookings_deleted, 1);
    assert_eq!(outcome.rooms_released, 1);
    assert_eq!(rooms.flag_of(room.id).unwrap(), Some(false));
    assert!(bookings.is_empty().unwrap());
}

#[tokio::test]
async fn cancel_of_missing_booking_reports_zero_deleted() {
    let rooms = MemoryRooms::new();
    let service = BookingService::new(Arc::new(rooms.clone()), Arc::new(MemoryBookings::new()));

    let room = listed_room(&rooms).await;
    let outcome = service
        .cancel_booking(stayhub_core::BookingId::new(), room.id)
        .await
        .unwrap();
    assert_eq!(outcome.bookings_deleted, 0);
    assert_eq!(outcome.rooms_released, 1);
}

#[tokio::test]
async fn deleting_a_missing_room_twice_is_zero_affected_both_times() {
    let rooms = MemoryRooms::new();
    let ghost = RoomId::new();
    assert_eq!(rooms.delete(ghost, "host@example.com").await.unwrap(), 0);
    assert_eq!(rooms.delete(ghost, "host@example.com").await.unwrap(), 0);
}

#[tokio::test]
async fn editing_a_room_relists_it() {
    let rooms = MemoryRooms::new();
    let room = listed_room(&rooms).await;
    rooms.set_booked(room.id, true).await.unwrap();

    let affected = rooms
        .update(UpdateRoom {
            id: room.id,
            host_email: "host@example.com".to_string(),
            title: "Seaside loft, renovated".to_string(),
            category: "loft".to_string(),
            price_per_night: 120,
        })
        .await
        .unwrap();
    assert_eq!(affected, 1);
    assert_eq!(rooms.flag_of(room.id).unwrap(), Some(false));

    // A non-owner edit reads as zero affected and changes nothing.
    let denied = rooms
        .update(UpdateRoom {
            id: room.id,
            host_email: "intruder@example.com".to_string(),
            title: "Hijacked".to_string(),
            category: "loft".to_string(),
            price_per_night: 1,
        })
        .await
        .unwrap();
    assert_eq!(denied, 0);
    let stored = rooms.find_by_id(room.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Seaside loft, renovated");
}

/// Room store whose release write always fails, to drive the cancel sequence
/// into its half-completed branch.
#[derive(Clone)]
struct StuckRooms {
    inner: MemoryRooms,
}

#[async_trait]
impl RoomRepository for StuckRooms {
    async fn create(&self, cmd: CreateRoom) -> Result<Room> {
        self.inner.create(cmd).await
    }
    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>> {
        self.inner.find_by_id(id).await
    }
    async fn list_available(&self, category: Option<&str>) -> Result<Vec<Room>> {
        self.inner.list_available(category).await
    }
    async fn list_by_host(&self, host_email: &str) -> Result<Vec<Room>> {
        self.inner.list_by_host(host_email).await
    }
    async fn update(&self, cmd: UpdateRoom) -> Result<u64> {
        self.inner.update(cmd).await
    }
    async fn delete(&self, id: RoomId, host_email: &str) -> Result<u64> {
        self.inner.delete(id, host_email).await
    }
    async fn set_booked(&self, _id: RoomId, _booked: bool) -> Result<u64> {
        Err(DomainError::Store("write rejected".to_string()))
    }
    async fn claim(&self, id: RoomId) -> Result<bool> {
        self.inner.claim(id).await
    }
}

#[tokio::test]
async fn half_completed_cancel_surfaces_the_orphaned_room() {
    let inner = MemoryRooms::new();
    let room = listed_room(&inner).await;
    let bookings = MemoryBookings::new();

    // Book through the healthy store, then cancel through one whose release
    // write fails.
    let healthy = BookingService::new(Arc::new(inner.clone()), Arc::new(bookings.clone()));
    let booking = healthy.create_booking(booking_for(room.id, "g@example.com")).await.unwrap();

    let stuck = BookingService::new(
        Arc::new(StuckRooms { inner: inner.clone() }),
        Arc::new(bookings.clone()),
    );
    let err = stuck.cancel_booking(booking.id, room.id).await.unwrap_err();

    assert!(matches!(err, DomainError::PartialCancellation { room_id, .. } if room_id == room.id));
    // The booking record is gone, the room is orphaned-unavailable.
    assert!(bookings.is_empty().unwrap());
    assert_eq!(inner.flag_of(room.id).unwrap(), Some(true));
}
