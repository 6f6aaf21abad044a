//! PostgreSQL room availability store.

use crate::store_err;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use stayhub_core::{CreateRoom, Result, Room, RoomId, RoomRepository, UpdateRoom};
use uuid::Uuid;

/// Room repository backed by the `rooms` table.
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    /// Wrap a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    title: String,
    category: String,
    price_per_night: i64,
    host_email: String,
    host_name: Option<String>,
    is_booked: bool,
    created_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Self {
            id: RoomId(row.id),
            title: row.title,
            category: row.category,
            price_per_night: row.price_per_night,
            host_email: row.host_email,
            host_name: row.host_name,
            is_booked: row.is_booked,
            created_at: row.created_at,
        }
    }
}

const SELECT_ROOM: &str = "SELECT id, title, category, price_per_night, host_email, host_name, is_booked, created_at FROM rooms";

#[async_trait]
impl RoomRepository for PgRoomRepository {
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
        sqlx::query(
            "INSERT INTO rooms (id, title, category, price_per_night, host_email, host_name, is_booked, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(room.id.0)
        .bind(&room.title)
        .bind(&room.category)
        .bind(room.price_per_night)
        .bind(&room.host_email)
        .bind(&room.host_name)
        .bind(room.is_booked)
        .bind(room.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err("failed to create room"))?;
        Ok(room)
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>> {
        let row: Option<RoomRow> = sqlx::query_as(&format!("{SELECT_ROOM} WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err("failed to get room"))?;
        Ok(row.map(Room::from))
    }

    async fn list_available(&self, category: Option<&str>) -> Result<Vec<Room>> {
        // One statement for both shapes: a NULL category means no filter.
        let rows: Vec<RoomRow> = sqlx::query_as(&format!(
            "{SELECT_ROOM} WHERE is_booked = FALSE AND ($1::text IS NULL OR category = $1)
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err("failed to list rooms"))?;
        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn list_by_host(&self, host_email: &str) -> Result<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(&format!(
            "{SELECT_ROOM} WHERE host_email = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(host_email)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err("failed to list host rooms"))?;
        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn update(&self, cmd: UpdateRoom) -> Result<u64> {
        // Owner-keyed; editing re-lists, so the flag resets in the same write.
        let result = sqlx::query(
            "UPDATE rooms
             SET title = $3, category = $4, price_per_night = $5, is_booked = FALSE
             WHERE id = $1 AND host_email = $2",
        )
        .bind(cmd.id.0)
        .bind(&cmd.host_email)
        .bind(&cmd.title)
        .bind(&cmd.category)
        .bind(cmd.price_per_night)
        .execute(&self.pool)
        .await
        .map_err(store_err("failed to update room"))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: RoomId, host_email: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1 AND host_email = $2")
            .bind(id.0)
            .bind(host_email)
            .execute(&self.pool)
            .await
            .map_err(store_err("failed to delete room"))?;
        Ok(result.rows_affected())
    }

    async fn set_booked(&self, id: RoomId, booked: bool) -> Result<u64> {
        let result = sqlx::query("UPDATE rooms SET is_booked = $2 WHERE id = $1")
            .bind(id.0)
            .bind(booked)
            .execute(&self.pool)
            .await
            .map_err(store_err("failed to set room status"))?;
        Ok(result.rows_affected())
    }

    async fn claim(&self, id: RoomId) -> Result<bool> {
        // Compare-and-swap on the flag: of two concurrent claims, exactly one
        // matches the WHERE clause and sees rows_affected == 1.
        let result = sqlx::query("UPDATE rooms SET is_booked = TRUE WHERE id = $1 AND is_booked = FALSE")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(store_err("failed to claim room"))?;
        Ok(result.rows_affected() == 1)
    }
}
