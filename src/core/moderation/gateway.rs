// Port onto the chat platform's moderation operations.
//
// The core only talks to the platform through this trait. The Discord layer
// implements it over serenity's HTTP client; tests use in-memory fakes.

use super::moderation_models::AuditRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// Message, role or member is already gone
    #[error("Target not found")]
    NotFound,

    /// The bot lacks the permission for this operation
    #[error("Missing permissions")]
    MissingPermissions,

    #[error("Platform error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Failures that routinely happen during moderation and need no attention.
    pub fn is_expected(&self) -> bool {
        matches!(self, GatewayError::NotFound | GatewayError::MissingPermissions)
    }
}

#[async_trait]
pub trait ModerationGateway: Send + Sync + 'static {
    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), GatewayError>;

    /// Find the guild's mute role by name, creating it (and denying it send and
    /// react in every channel) when it does not exist yet. Returns the role id.
    async fn ensure_muted_role(&self, guild_id: u64, role_name: &str)
        -> Result<u64, GatewayError>;

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), GatewayError>;

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), GatewayError>;

    async fn ban_member(&self, guild_id: u64, user_id: u64, reason: &str)
        -> Result<(), GatewayError>;

    /// Post an audit record to a channel.
    async fn send_audit(&self, channel_id: u64, record: &AuditRecord) -> Result<(), GatewayError>;
}
