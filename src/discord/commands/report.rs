// /report - forward a suspicious message to the guild's moderators.

use crate::core::reports::{parse_message_id, UserReport};
use crate::discord::moderation::formatter::format_user_report;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

async fn reply(ctx: Context<'_>, text: &str) -> Result<(), Error> {
    ctx.send(poise::CreateReply::default().content(text).ephemeral(true))
        .await?;
    Ok(())
}

/// Report a message to the moderators
#[poise::command(slash_command, guild_only)]
pub async fn report(
    ctx: Context<'_>,
    #[description = "ID of the message to report (in this channel)"] message_id: String,
    #[description = "Why are you reporting it?"] reason: String,
) -> Result<(), Error> {
    let guild_id = ctx
        .guild_id()
        .ok_or("This command only works in servers")?
        .get();

    let message_id = match parse_message_id(&message_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(guild_id, "Rejected report: {}", e);
            return reply(ctx, "Message not found!").await;
        }
    };

    let message = match ctx
        .channel_id()
        .message(ctx.serenity_context(), serenity::MessageId::new(message_id))
        .await
    {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(guild_id, message_id, "Reported message lookup failed: {}", e);
            return reply(ctx, "Message not found!").await;
        }
    };

    let Some(log_channel) = ctx.data().settings.log_channel(guild_id).await else {
        return reply(ctx, "No log channel set up!").await;
    };

    let report = UserReport::new(
        guild_id,
        ctx.author().id.get(),
        message.author.id.get(),
        &reason,
        &message.content,
    );

    let sent = serenity::ChannelId::new(log_channel)
        .send_message(
            ctx.serenity_context(),
            serenity::CreateMessage::new().embed(format_user_report(&report)),
        )
        .await;

    if let Err(e) = sent {
        tracing::warn!(guild_id, log_channel, "Failed to deliver report: {}", e);
        return reply(ctx, "Could not deliver the report to the log channel.").await;
    }

    tracing::info!(
        guild_id,
        reporter_id = report.reporter_id,
        reported_user_id = report.reported_user_id,
        "User report submitted"
    );

    reply(ctx, "Report submitted successfully!").await
}
