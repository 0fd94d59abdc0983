use super::settings_models::GuildSettings;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait GuildSettingsStore: Send + Sync {
    async fn get_settings(&self, guild_id: u64) -> Result<Option<GuildSettings>>;
    async fn save_settings(&self, settings: GuildSettings) -> Result<()>;
}

pub struct GuildSettingsService<S: GuildSettingsStore> {
    store: S,
}

impl<S: GuildSettingsStore> GuildSettingsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Set both the log channel and the admin role for a guild.
    pub async fn configure(
        &self,
        guild_id: u64,
        log_channel_id: u64,
        admin_role_id: u64,
    ) -> Result<()> {
        let settings = GuildSettings {
            guild_id,
            log_channel_id: Some(log_channel_id),
            admin_role_id: Some(admin_role_id),
        };
        self.store.save_settings(settings).await
    }

    /// Log channel for the guild. Lookup failures count as "not configured".
    pub async fn log_channel(&self, guild_id: u64) -> Option<u64> {
        self.lookup(guild_id)
            .await
            .and_then(|settings| settings.log_channel_id)
    }

    /// Admin role for the guild. Lookup failures count as "not configured".
    pub async fn admin_role(&self, guild_id: u64) -> Option<u64> {
        self.lookup(guild_id)
            .await
            .and_then(|settings| settings.admin_role_id)
    }

    async fn lookup(&self, guild_id: u64) -> Option<GuildSettings> {
        match self.store.get_settings(guild_id).await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(guild_id, "Failed to load guild settings: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashmap::DashMap;

    #[derive(Default)]
    struct MockSettingsStore {
        settings: DashMap<u64, GuildSettings>,
        broken: bool,
    }

    #[async_trait]
    impl GuildSettingsStore for MockSettingsStore {
        async fn get_settings(&self, guild_id: u64) -> Result<Option<GuildSettings>> {
            if self.broken {
                anyhow::bail!("connection reset");
            }
            Ok(self.settings.get(&guild_id).map(|s| s.clone()))
        }

        async fn save_settings(&self, settings: GuildSettings) -> Result<()> {
            self.settings.insert(settings.guild_id, settings);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unconfigured_guild() {
        let service = GuildSettingsService::new(MockSettingsStore::default());

        assert_eq!(service.log_channel(1).await, None);
        assert_eq!(service.admin_role(1).await, None);
    }

    #[tokio::test]
    async fn test_configure_then_lookup() {
        let service = GuildSettingsService::new(MockSettingsStore::default());
        service.configure(1, 100, 200).await.unwrap();

        assert_eq!(service.log_channel(1).await, Some(100));
        assert_eq!(service.admin_role(1).await, Some(200));
        assert_eq!(service.log_channel(2).await, None);
    }

    #[tokio::test]
    async fn test_store_failure_reads_as_unconfigured() {
        let store = MockSettingsStore {
            broken: true,
            ..Default::default()
        };
        let service = GuildSettingsService::new(store);

        assert_eq!(service.log_channel(1).await, None);
        assert_eq!(service.admin_role(1).await, None);
    }
}
