// Audit sink - hands finished audit records to the guild's log channel.

use super::gateway::ModerationGateway;
use super::moderation_models::AuditRecord;
use std::sync::Arc;

pub struct AuditSink<G: ModerationGateway> {
    gateway: Arc<G>,
    max_content_chars: usize,
}

impl<G: ModerationGateway> AuditSink<G> {
    pub fn new(gateway: Arc<G>, max_content_chars: usize) -> Self {
        Self {
            gateway,
            max_content_chars,
        }
    }

    /// Deliver `record` to `destination`.
    ///
    /// No destination means logging is not set up for the guild, which is not
    /// an error. Returns whether the record reached the channel.
    pub async fn deliver(&self, record: &AuditRecord, destination: Option<u64>) -> bool {
        let Some(channel_id) = destination else {
            tracing::debug!(guild_id = record.guild_id, "No log channel configured");
            return false;
        };

        let bounded = record.with_content_limit(self.max_content_chars);
        match self.gateway.send_audit(channel_id, &bounded).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to send audit log to channel {}: {}", channel_id, e);
                false
            }
        }
    }
}
