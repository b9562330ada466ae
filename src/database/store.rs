use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::database::models::User;

/// Errors from UserStore
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no user with id {0}")]
    NotFound(i64),

    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

/// Single owner of the `users` table. Every durable read and write goes
/// through here; email uniqueness is enforced by the UNIQUE constraint so
/// concurrent writers serialize at the storage layer rather than racing a
/// handler-side pre-check.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO users (name, email, password_hash, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {USER_COLUMNS}"
        );

        match sqlx::query_as::<_, User>(&sql)
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
        {
            Ok(user) => Ok(user),
            Err(e) if is_unique_violation(&e) => {
                Err(StoreError::DuplicateEmail(email.to_string()))
            }
            Err(e) => Err(StoreError::Sqlx(e)),
        }
    }

    pub async fn get(&self, id: i64) -> Result<User, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Login and token-resolution path. Absence is not an error here; the
    /// callers decide how much to reveal.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");

        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Records in insertion order. Callers clamp `limit` before handing it
    /// over; the store executes the window it is given.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT ?1 OFFSET ?2");

        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Partial update; unspecified fields are left untouched. A single
    /// UPDATE .. RETURNING keeps the uniqueness check and the write atomic.
    pub async fn update(
        &self,
        id: i64,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, StoreError> {
        let sql = format!(
            "UPDATE users \
             SET name = COALESCE(?1, name), email = COALESCE(?2, email), updated_at = ?3 \
             WHERE id = ?4 RETURNING {USER_COLUMNS}"
        );

        match sqlx::query_as::<_, User>(&sql)
            .bind(name)
            .bind(email)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(StoreError::NotFound(id)),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateEmail(
                email.unwrap_or_default().to_string(),
            )),
            Err(e) => Err(StoreError::Sqlx(e)),
        }
    }

    /// Returns the deleted record. Deleting a missing id is a visible
    /// NotFound, not a silent no-op.
    pub async fn delete(&self, id: i64) -> Result<User, StoreError> {
        let sql = format!("DELETE FROM users WHERE id = ?1 RETURNING {USER_COLUMNS}");

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
