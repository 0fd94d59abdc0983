// SQLite-backed warning store.
//
// Tables:
// - user_warnings: warning count per (user, guild)

use crate::core::moderation::{ViolationKind, WarningRecord, WarningStore, WarningStoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};

pub struct SqliteWarningStore {
    pool: Pool<Sqlite>,
}

impl SqliteWarningStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Run database migrations to create required tables.
    pub async fn migrate(&self) -> Result<(), WarningStoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_warnings (
                user_id INTEGER NOT NULL,
                guild_id INTEGER NOT NULL,
                warnings INTEGER NOT NULL DEFAULT 0,
                last_warning TEXT NOT NULL,
                last_violation TEXT NOT NULL,
                PRIMARY KEY (user_id, guild_id)
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| WarningStoreError::StorageError(e.to_string()))?;

        Ok(())
    }
}

fn row_to_record(row: &SqliteRow) -> Result<WarningRecord, WarningStoreError> {
    let last_warning_str: String = row.get("last_warning");
    let last_warning = DateTime::parse_from_rfc3339(&last_warning_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| WarningStoreError::StorageError(e.to_string()))?;

    let violation_str: String = row.get("last_violation");
    let last_violation = ViolationKind::from_str_opt(&violation_str).ok_or_else(|| {
        WarningStoreError::StorageError(format!("unknown violation kind {}", violation_str))
    })?;

    Ok(WarningRecord {
        user_id: row.get::<i64, _>("user_id") as u64,
        guild_id: row.get::<i64, _>("guild_id") as u64,
        warnings: row.get::<i64, _>("warnings") as u32,
        last_warning,
        last_violation,
    })
}

#[async_trait]
impl WarningStore for SqliteWarningStore {
    async fn add_warning(
        &self,
        user_id: u64,
        guild_id: u64,
        violation: ViolationKind,
        at: DateTime<Utc>,
    ) -> Result<WarningRecord, WarningStoreError> {
        // Single upsert statement, so concurrent increments cannot be lost
        let row = sqlx::query(
            r#"
            INSERT INTO user_warnings (user_id, guild_id, warnings, last_warning, last_violation)
            VALUES (?, ?, 1, ?, ?)
            ON CONFLICT(user_id, guild_id) DO UPDATE SET
                warnings = warnings + 1,
                last_warning = excluded.last_warning,
                last_violation = excluded.last_violation
            RETURNING user_id, guild_id, warnings, last_warning, last_violation
            "#,
        )
        .bind(user_id as i64)
        .bind(guild_id as i64)
        .bind(at.to_rfc3339())
        .bind(violation.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| WarningStoreError::StorageError(e.to_string()))?;

        row_to_record(&row)
    }

    async fn get_warning(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<Option<WarningRecord>, WarningStoreError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, guild_id, warnings, last_warning, last_violation
            FROM user_warnings
            WHERE user_id = ? AND guild_id = ?
            "#,
        )
        .bind(user_id as i64)
        .bind(guild_id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| WarningStoreError::StorageError(e.to_string()))?;

        row.as_ref().map(row_to_record).transpose()
    }
}
