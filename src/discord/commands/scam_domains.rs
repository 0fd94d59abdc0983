// Discord commands for the scam domain blocklist
//
// 1. Extract primitive data from Discord types
// 2. Call the moderation engine
// 3. Format the response

use crate::core::moderation::BlocklistError;
use crate::discord::commands::checks::admin_role_required;
use crate::discord::{Context, Error};

async fn reply(ctx: Context<'_>, text: String) -> Result<(), Error> {
    ctx.send(poise::CreateReply::default().content(text).ephemeral(true))
        .await?;
    Ok(())
}

/// Add a domain to the scam blocklist
#[poise::command(slash_command, guild_only, check = "admin_role_required")]
pub async fn addscam(
    ctx: Context<'_>,
    #[description = "Domain to block, e.g. free-nitro.example"] domain: String,
) -> Result<(), Error> {
    let moderation = &ctx.data().moderation;

    match moderation.add_domain(&domain).await {
        Ok(update) if update.changed => {
            tracing::info!(
                domain = %update.domain,
                user_id = ctx.author().id.get(),
                "Scam domain added"
            );
            let total = moderation.blocked_domain_count().await;
            reply(
                ctx,
                format!(
                    "Added `{}` to scam blocklist ({} domains blocked)",
                    update.domain, total
                ),
            )
            .await
        }
        Ok(update) => {
            reply(
                ctx,
                format!("`{}` was already on the blocklist", update.domain),
            )
            .await
        }
        Err(BlocklistError::InvalidDomain(raw)) => {
            reply(ctx, format!("`{}` is not a valid domain", raw.trim())).await
        }
        Err(e) => Err(e.into()),
    }
}

/// Remove a domain from the scam blocklist
#[poise::command(slash_command, guild_only, check = "admin_role_required")]
pub async fn removescam(
    ctx: Context<'_>,
    #[description = "Domain to unblock"] domain: String,
) -> Result<(), Error> {
    match ctx.data().moderation.remove_domain(&domain).await {
        Ok(update) if update.changed => {
            tracing::info!(
                domain = %update.domain,
                user_id = ctx.author().id.get(),
                "Scam domain removed"
            );
            reply(ctx, format!("Removed `{}` from blocklist", update.domain)).await
        }
        Ok(_) => reply(ctx, "Domain not found in blocklist".to_string()).await,
        Err(BlocklistError::InvalidDomain(raw)) => {
            reply(ctx, format!("`{}` is not a valid domain", raw.trim())).await
        }
        Err(e) => Err(e.into()),
    }
}

/// Check whether a domain is on the scam blocklist
#[poise::command(slash_command, guild_only, check = "admin_role_required")]
pub async fn checkscam(
    ctx: Context<'_>,
    #[description = "Domain or link to check"] domain: String,
) -> Result<(), Error> {
    let text = if ctx.data().moderation.is_blocked_domain(&domain).await {
        format!("`{}` is on the scam blocklist", domain.trim())
    } else {
        format!("`{}` is not on the scam blocklist", domain.trim())
    };

    reply(ctx, text).await
}
