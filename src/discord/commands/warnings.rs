// /warnings - show a member's warning record in this guild.

use crate::discord::commands::checks::admin_role_required;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Show how many warnings a member has collected
#[poise::command(slash_command, guild_only, check = "admin_role_required")]
pub async fn warnings(
    ctx: Context<'_>,
    #[description = "Member to look up"] user: serenity::User,
) -> Result<(), Error> {
    let guild_id = ctx
        .guild_id()
        .ok_or("This command only works in servers")?
        .get();

    let record = ctx
        .data()
        .moderation
        .warnings_for(user.id.get(), guild_id)
        .await?;

    let text = match record {
        Some(record) => format!(
            "<@{}> has **{}** warning{}. Last: {} at <t:{}:f>",
            user.id,
            record.warnings,
            if record.warnings == 1 { "" } else { "s" },
            record.last_violation,
            record.last_warning.timestamp()
        ),
        None => format!("<@{}> has no warnings.", user.id),
    };

    ctx.send(poise::CreateReply::default().content(text).ephemeral(true))
        .await?;

    Ok(())
}
