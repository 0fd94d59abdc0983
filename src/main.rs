// This is the entry point of the moderation bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (SQLite, flat files)
// - `discord/` = Discord-specific adapters (commands, events, gateway)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::moderation::{DomainBlocklist, ModerationConfig, ModerationEngine};
use crate::core::settings::GuildSettingsService;
use crate::discord::commands::presence;
use crate::discord::moderation::message_handler::handle_message_for_moderation;
use crate::discord::moderation::SerenityGateway;
use crate::discord::{Data, Error};
use crate::infra::moderation::{FlatFileBlocklistStore, SqliteWarningStore};
use crate::infra::settings::SqliteGuildSettingsStore;
use chrono::Utc;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// How often idle rate windows are dropped from memory.
const PRUNE_INTERVAL_SECS: u64 = 60;

/// Event handler for non-command Discord events.
/// Every guild message goes through automatic moderation.
async fn event_handler(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Message { new_message } = event {
        handle_message_for_moderation(new_message, data).await;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenv::dotenv().ok();

    let token = std::env::var("DISCORD_TOKEN").expect(
        "Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.",
    );

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    std::fs::create_dir_all(&data_dir).expect("Failed to create data directory for SQLite files");
    let db_path = format!("{}/moderation.db", data_dir);
    let blocklist_path = std::env::var("SCAM_DOMAIN_FILE")
        .unwrap_or_else(|_| format!("{}/scam_domains.txt", data_dir));

    // ========================================================================
    // Storage
    // ========================================================================

    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .connect(&format!("sqlite://{}?mode=rwc", db_path))
        .await
        .expect("Failed to connect to moderation DB");

    let warning_store = SqliteWarningStore::new(pool.clone());
    warning_store
        .migrate()
        .await
        .expect("Failed to migrate warnings table");

    let settings_store = SqliteGuildSettingsStore::new(pool);
    settings_store
        .migrate()
        .await
        .expect("Failed to migrate guild settings table");
    let settings = Arc::new(GuildSettingsService::new(settings_store));

    let blocklist = DomainBlocklist::load(FlatFileBlocklistStore::new(&blocklist_path))
        .await
        .expect("Failed to load scam domain blocklist");
    tracing::info!(
        path = %blocklist_path,
        domains = blocklist.len().await,
        "Loaded scam domain blocklist"
    );

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                discord::commands::setup::setup(),
                discord::commands::scam_domains::addscam(),
                discord::commands::scam_domains::removescam(),
                discord::commands::scam_domains::checkscam(),
                discord::commands::warnings::warnings(),
                discord::commands::report::report(),
            ],
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                tracing::info!(user = %ready.user.name, "Bot is starting up");

                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!("Commands registered");

                presence::on_ready(ctx);

                // The gateway needs the live HTTP client, so the engine is
                // assembled here rather than before the client exists.
                let gateway = Arc::new(SerenityGateway::new(ctx.http.clone()));
                let moderation = Arc::new(ModerationEngine::new(
                    ModerationConfig::default(),
                    blocklist,
                    warning_store,
                    Arc::clone(&settings),
                    gateway,
                ));

                let prune_target = Arc::clone(&moderation);
                tokio::spawn(async move {
                    use std::time::Duration as StdDuration;
                    use tokio::time::sleep;

                    loop {
                        sleep(StdDuration::from_secs(PRUNE_INTERVAL_SECS)).await;
                        let pruned = prune_target.prune_idle_windows(Utc::now());
                        if pruned > 0 {
                            tracing::debug!(pruned, "Dropped idle rate windows");
                        }
                    }
                });

                tracing::info!("Bot is ready");

                Ok(Data {
                    moderation,
                    settings,
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .expect("Failed to create client");

    client.start().await.expect("Failed to start client");
}
