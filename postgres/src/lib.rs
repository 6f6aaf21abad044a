//! PostgreSQL implementations of the StayHub repository contracts.
//!
//! Each repository holds a cloned [`PgPool`] handle; pools are created once
//! at startup and injected, never reached through ambient state. Queries use
//! sqlx's runtime API so the crate builds without a live `DATABASE_URL`.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use stayhub_core::{DomainError, Result};

mod booking;
mod room;
mod user;

pub use booking::PgBookingRepository;
pub use room::PgRoomRepository;
pub use user::PgUserRepository;

/// Open a connection pool against the given database URL.
///
/// # Errors
///
/// Returns [`DomainError::Store`] if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| DomainError::Store(format!("failed to connect: {e}")))
}

/// Run the embedded migrations.
///
/// # Errors
///
/// Returns [`DomainError::Store`] if a migration fails.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::Store(format!("migration failed: {e}")))
}

/// Map a sqlx error into the domain taxonomy with an operation label.
fn store_err(op: &str) -> impl FnOnce(sqlx::Error) -> DomainError + '_ {
    move |e| DomainError::Store(format!("{op}: {e}"))
}
