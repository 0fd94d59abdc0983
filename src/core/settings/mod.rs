pub mod settings_models;
pub mod settings_service;

pub use settings_models::GuildSettings;
pub use settings_service::{GuildSettingsService, GuildSettingsStore};
