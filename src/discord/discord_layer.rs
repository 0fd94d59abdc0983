// Discord layer - commands, event handlers and the serenity gateway.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "moderation/mod.rs"]
pub mod moderation;

use crate::core::moderation::ModerationEngine;
use crate::core::settings::GuildSettingsService;
use crate::infra::moderation::{FlatFileBlocklistStore, SqliteWarningStore};
use crate::infra::settings::SqliteGuildSettingsStore;
use self::moderation::SerenityGateway;
use std::sync::Arc;

/// Type alias for our bot's context.
/// This is what every command receives as its first parameter.
pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// The moderation engine wired to its production stores and gateway.
pub type Moderation = ModerationEngine<
    FlatFileBlocklistStore,
    SqliteWarningStore,
    SqliteGuildSettingsStore,
    SerenityGateway,
>;

/// Data that's shared across all commands and event handlers.
pub struct Data {
    pub moderation: Arc<Moderation>,
    pub settings: Arc<GuildSettingsService<SqliteGuildSettingsStore>>,
}
