// /setup - configure the log channel and admin role for a guild.

use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Set up the moderation system
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn setup(
    ctx: Context<'_>,
    #[description = "Channel for moderation logs"] log_channel: serenity::Channel,
    #[description = "Role allowed to use moderation commands"] admin_role: serenity::Role,
) -> Result<(), Error> {
    let guild_id = ctx
        .guild_id()
        .ok_or("This command only works in servers")?
        .get();
    let channel_id = log_channel.id().get();
    let role_id = admin_role.id.get();

    ctx.data()
        .settings
        .configure(guild_id, channel_id, role_id)
        .await?;

    tracing::info!(guild_id, channel_id, role_id, "Moderation configured");

    ctx.send(
        poise::CreateReply::default()
            .content(format!(
                "Setup complete! Logs go to <#{}>, moderation commands need <@&{}>.",
                channel_id, role_id
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
