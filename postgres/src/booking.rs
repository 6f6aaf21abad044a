//! PostgreSQL booking ledger.

use crate::store_err;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use stayhub_core::{Booking, BookingId, BookingRepository, CreateBooking, Result, RoomId};
use uuid::Uuid;

/// Booking repository backed by the `bookings` table.
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Wrap a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    room_id: Uuid,
    guest_email: String,
    host_email: String,
    price: i64,
    booking_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: BookingId(row.id),
            room_id: RoomId(row.room_id),
            guest_email: row.guest_email,
            host_email: row.host_email,
            price: row.price,
            booking_date: row.booking_date,
            created_at: row.created_at,
        }
    }
}

const SELECT_BOOKING: &str =
    "SELECT id, room_id, guest_email, host_email, price, booking_date, created_at FROM bookings";

#[async_trait]
impl BookingRepository for PgBookingRepository {
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
        sqlx::query(
            "INSERT INTO bookings (id, room_id, guest_email, host_email, price, booking_date, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(booking.id.0)
        .bind(booking.room_id.0)
        .bind(&booking.guest_email)
        .bind(&booking.host_email)
        .bind(booking.price)
        .bind(booking.booking_date)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err("failed to create booking"))?;
        Ok(booking)
    }

    async fn list_by_guest(&self, guest_email: &str) -> Result<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "{SELECT_BOOKING} WHERE guest_email = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(guest_email)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err("failed to list guest bookings"))?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn list_by_host(&self, host_email: &str) -> Result<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "{SELECT_BOOKING} WHERE host_email = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(host_email)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err("failed to list host bookings"))?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn delete(&self, id: BookingId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(store_err("failed to delete booking"))?;
        Ok(result.rows_affected())
    }
}
