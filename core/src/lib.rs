//! Core domain for the StayHub room-rental marketplace.
//!
//! This crate holds everything that is independent of the HTTP boundary and
//! of any concrete storage engine:
//!
//! - the domain model (rooms, bookings, directory records),
//! - the repository contracts the storage adapters implement,
//! - the error taxonomy, and
//! - the [`BookingService`], which coordinates the two-entity booking
//!   lifecycle (room availability flag + booking ledger record).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  HTTP boundary (stayhub-web)             │  ← auth gate, JSON, status codes
//! ├──────────────────────────────────────────┤
//! │  BookingService (this crate)             │  ← claim → write ordering,
//! │                                          │    partial-failure surfacing
//! ├──────────────────────────────────────────┤
//! │  RoomRepository / BookingRepository /    │  ← PostgreSQL in production,
//! │  UserRepository (traits, this crate)     │    in-memory in tests
//! └──────────────────────────────────────────┘
//! ```
//!
//! Repositories are injected as `Arc<dyn …>` at construction; nothing in this
//! crate reaches for ambient global state, and nothing caches records — every
//! operation re-reads current store state because requests run concurrently.

pub mod error;
pub mod model;
pub mod repository;
pub mod service;

pub use error::{DomainError, Result};
pub use model::{
    ApprovalStatus, Booking, BookingId, CreateBooking, CreateRoom, Role, Room, RoomId, UpdateRoom,
    UpsertUser, UserRecord,
};
pub use repository::{BookingRepository, RoomRepository, UserRepository};
pub use service::{BookingService, CancelOutcome};
