// Serenity implementation of the core `ModerationGateway` port.
//
// Every call goes straight to Discord's HTTP API. Errors are classified so the
// core can tell routine failures (404 / 403) from real problems.

use crate::core::moderation::{AuditRecord, GatewayError, ModerationGateway};
use crate::discord::moderation::formatter::format_audit_record;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

pub struct SerenityGateway {
    http: Arc<::serenity::http::Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<::serenity::http::Http>) -> Self {
        Self { http }
    }
}

fn classify_error(err: ::serenity::Error) -> GatewayError {
    if let ::serenity::Error::Http(http_err) = &err {
        match http_err.status_code().map(|status| status.as_u16()) {
            Some(404) => return GatewayError::NotFound,
            Some(403) => return GatewayError::MissingPermissions,
            _ => {}
        }
    }
    GatewayError::Other(err.to_string())
}

#[async_trait]
impl ModerationGateway for SerenityGateway {
    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), GatewayError> {
        serenity::ChannelId::new(channel_id)
            .delete_message(&self.http, serenity::MessageId::new(message_id))
            .await
            .map_err(classify_error)
    }

    async fn ensure_muted_role(
        &self,
        guild_id: u64,
        role_name: &str,
    ) -> Result<u64, GatewayError> {
        let guild = serenity::GuildId::new(guild_id);

        let roles = guild.roles(&self.http).await.map_err(classify_error)?;
        if let Some(role) = roles.values().find(|role| role.name == role_name) {
            return Ok(role.id.get());
        }

        let role = guild
            .create_role(&self.http, serenity::EditRole::new().name(role_name))
            .await
            .map_err(classify_error)?;
        tracing::info!(guild_id, role_id = role.id.get(), "Created muted role");

        // Deny talking and reacting everywhere. A channel we cannot edit only
        // weakens the mute there, so keep going.
        let channels = match guild.channels(&self.http).await {
            Ok(channels) => channels,
            Err(e) => {
                tracing::warn!(guild_id, "Failed to list channels for muted role: {}", e);
                return Ok(role.id.get());
            }
        };

        for channel_id in channels.keys() {
            let overwrite = serenity::PermissionOverwrite {
                allow: serenity::Permissions::empty(),
                deny: serenity::Permissions::SEND_MESSAGES | serenity::Permissions::ADD_REACTIONS,
                kind: serenity::PermissionOverwriteType::Role(role.id),
            };

            if let Err(e) = channel_id.create_permission(&self.http, overwrite).await {
                tracing::warn!(
                    guild_id,
                    channel_id = channel_id.get(),
                    "Failed to restrict muted role: {}",
                    e
                );
            }
        }

        Ok(role.id.get())
    }

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), GatewayError> {
        self.http
            .add_member_role(
                serenity::GuildId::new(guild_id),
                serenity::UserId::new(user_id),
                serenity::RoleId::new(role_id),
                Some(reason),
            )
            .await
            .map_err(classify_error)
    }

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), GatewayError> {
        self.http
            .remove_member_role(
                serenity::GuildId::new(guild_id),
                serenity::UserId::new(user_id),
                serenity::RoleId::new(role_id),
                Some(reason),
            )
            .await
            .map_err(classify_error)
    }

    async fn ban_member(
        &self,
        guild_id: u64,
        user_id: u64,
        reason: &str,
    ) -> Result<(), GatewayError> {
        serenity::GuildId::new(guild_id)
            .ban_with_reason(&self.http, serenity::UserId::new(user_id), 0, reason)
            .await
            .map_err(classify_error)
    }

    async fn send_audit(&self, channel_id: u64, record: &AuditRecord) -> Result<(), GatewayError> {
        let embed = format_audit_record(record);

        serenity::ChannelId::new(channel_id)
            .send_message(&self.http, serenity::CreateMessage::new().embed(embed))
            .await
            .map(|_| ())
            .map_err(classify_error)
    }
}
