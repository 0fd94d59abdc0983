// Command checks shared by the moderation admin commands.

use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Passes when the invoking member holds the guild's configured admin role.
///
/// A guild that never ran `/setup` has no admin role, which leaves the gated
/// commands disabled rather than open to everyone.
pub async fn admin_role_required(ctx: Context<'_>) -> Result<bool, Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(false);
    };

    let Some(admin_role) = ctx.data().settings.admin_role(guild_id.get()).await else {
        ctx.send(
            poise::CreateReply::default()
                .content("No admin role set up! Run /setup first.")
                .ephemeral(true),
        )
        .await?;
        return Ok(false);
    };

    let has_role = match ctx.author_member().await {
        Some(member) => member.roles.contains(&serenity::RoleId::new(admin_role)),
        None => false,
    };

    if !has_role {
        ctx.send(
            poise::CreateReply::default()
                .content("You don't have permission to use this command!")
                .ephemeral(true),
        )
        .await?;
    }

    Ok(has_role)
}
