//! Shared application state.

use axum_extra::extract::cookie::SameSite;
use stayhub_auth::TokenService;
use stayhub_core::{BookingRepository, BookingService, RoomRepository, UserRepository};
use std::sync::Arc;

/// Deployment environment, controlling credential cookie attributes.
///
/// Production serves the browser client cross-site, so the cookie carries
/// `Secure; SameSite=None`. Development stays on `SameSite=Strict` without
/// the secure flag so plain-HTTP local setups keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development over plain HTTP.
    #[default]
    Development,
    /// Cross-site production deployment over HTTPS.
    Production,
}

impl Environment {
    /// Whether the credential cookie carries the `Secure` flag.
    #[must_use]
    pub const fn cookie_secure(self) -> bool {
        matches!(self, Self::Production)
    }

    /// `SameSite` attribute of the credential cookie.
    #[must_use]
    pub const fn cookie_same_site(self) -> SameSite {
        match self {
            Self::Production => SameSite::None,
            Self::Development => SameSite::Strict,
        }
    }
}

/// State shared by every handler.
///
/// Repositories are trait objects so tests can run the full router over the
/// in-memory stores. Cloning is cheap; everything inside is an `Arc` or a
/// cheaply-cloned service handle.
#[derive(Clone)]
pub struct AppState {
    /// Room availability store.
    pub rooms: Arc<dyn RoomRepository>,
    /// Booking ledger.
    pub bookings: Arc<dyn BookingRepository>,
    /// Role directory, consulted by the authorization gate.
    pub users: Arc<dyn UserRepository>,
    /// Booking lifecycle manager over `rooms` and `bookings`.
    pub lifecycle: BookingService,
    /// Credential issuing and validation.
    pub tokens: TokenService,
    /// Deployment environment for cookie policy.
    pub environment: Environment,
}

impl AppState {
    /// Wire the state; the lifecycle manager is built over the same store
    /// handles the handlers use directly.
    #[must_use]
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        bookings: Arc<dyn BookingRepository>,
        users: Arc<dyn UserRepository>,
        tokens: TokenService,
        environment: Environment,
    ) -> Self {
        let lifecycle = BookingService::new(Arc::clone(&rooms), Arc::clone(&bookings));
        Self {
            rooms,
            bookings,
            users,
            lifecycle,
            tokens,
            environment,
        }
    }
}
