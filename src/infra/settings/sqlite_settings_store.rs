use crate::core::settings::{GuildSettings, GuildSettingsStore};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};

pub struct SqliteGuildSettingsStore {
    pool: Pool<Sqlite>,
}

impl SqliteGuildSettingsStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS guild_settings (
                guild_id INTEGER PRIMARY KEY,
                log_channel INTEGER,
                admin_role INTEGER
            );
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl GuildSettingsStore for SqliteGuildSettingsStore {
    async fn get_settings(&self, guild_id: u64) -> Result<Option<GuildSettings>> {
        let row =
            sqlx::query("SELECT log_channel, admin_role FROM guild_settings WHERE guild_id = ?")
                .bind(guild_id as i64)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|row| GuildSettings {
            guild_id,
            log_channel_id: row.get::<Option<i64>, _>("log_channel").map(|id| id as u64),
            admin_role_id: row.get::<Option<i64>, _>("admin_role").map(|id| id as u64),
        }))
    }

    async fn save_settings(&self, settings: GuildSettings) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO guild_settings (guild_id, log_channel, admin_role)
            VALUES (?, ?, ?)
            ON CONFLICT(guild_id) DO UPDATE SET
                log_channel = excluded.log_channel,
                admin_role = excluded.admin_role
            "#,
        )
        .bind(settings.guild_id as i64)
        .bind(settings.log_channel_id.map(|id| id as i64))
        .bind(settings.admin_role_id.map(|id| id as i64))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
