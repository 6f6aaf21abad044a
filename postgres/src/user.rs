//! PostgreSQL role directory.

use crate::store_err;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use stayhub_core::{
    ApprovalStatus, DomainError, Result, Role, UpsertUser, UserRecord, UserRepository,
};

/// User repository backed by the `users` table.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Wrap a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    email: String,
    name: Option<String>,
    role: Option<String>,
    status: String,
    approved_at: Option<DateTime<Utc>>,
}

fn parse_role(raw: &str) -> Result<Role> {
    match raw {
        "guest" => Ok(Role::Guest),
        "host" => Ok(Role::Host),
        "admin" => Ok(Role::Admin),
        other => Err(DomainError::Store(format!("unknown role in store: {other}"))),
    }
}

fn parse_status(raw: &str) -> Result<ApprovalStatus> {
    match raw {
        "none" => Ok(ApprovalStatus::None),
        "Requested" => Ok(ApprovalStatus::Requested),
        "verified" => Ok(ApprovalStatus::Verified),
        other => Err(DomainError::Store(format!(
            "unknown approval status in store: {other}"
        ))),
    }
}

impl TryFrom<UserRow> for UserRecord {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(Self {
            email: row.email,
            name: row.name,
            role: row.role.as_deref().map(parse_role).transpose()?,
            status: parse_status(&row.status)?,
            approved_at: row.approved_at,
        })
    }
}

const SELECT_USER: &str = "SELECT email, name, role, status, approved_at FROM users";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn upsert(&self, cmd: UpsertUser) -> Result<UserRecord> {
        if let Some(existing) = self.find_by_email(&cmd.email).await? {
            // Existing records only ever take a status request.
            if cmd.status == Some(ApprovalStatus::Requested) {
                sqlx::query("UPDATE users SET status = $2 WHERE email = $1")
                    .bind(&cmd.email)
                    .bind(ApprovalStatus::Requested.as_str())
                    .execute(&self.pool)
                    .await
                    .map_err(store_err("failed to update user status"))?;
                return Ok(UserRecord {
                    status: ApprovalStatus::Requested,
                    ..existing
                });
            }
            return Ok(existing);
        }

        let record = UserRecord {
            email: cmd.email,
            name: cmd.name,
            role: None,
            status: cmd.status.unwrap_or_default(),
            approved_at: None,
        };
        sqlx::query(
            "INSERT INTO users (email, name, role, status, approved_at)
             VALUES ($1, $2, NULL, $3, NULL)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(&record.email)
        .bind(&record.name)
        .bind(record.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(store_err("failed to create user"))?;
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err("failed to get user"))?;
        row.map(UserRecord::try_from).transpose()
    }

    async fn grant_role(&self, email: &str, role: Role) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE users SET role = $2, status = $3, approved_at = $4 WHERE email = $1",
        )
        .bind(email)
        .bind(role.as_str())
        .bind(ApprovalStatus::Verified.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(store_err("failed to grant role"))?;
        Ok(result.rows_affected())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!("{SELECT_USER} ORDER BY email ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(store_err("failed to list users"))?;
        rows.into_iter().map(UserRecord::try_from).collect()
    }
}
