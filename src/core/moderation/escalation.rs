// Escalation engine - turns a detected violation into moderation actions.
//
// Steps run strictly in order and each one is isolated:
// 1. delete the offending message
// 2. record a warning for (user, guild)
// 3. apply the policy action (warn / mute / ban)
// 4. build the audit record
//
// Nothing is retried. Expected platform failures (already deleted, missing
// permission) are dropped quietly; anything else is logged and carried on the
// audit record so it stays visible.

use super::gateway::{GatewayError, ModerationGateway};
use super::moderation_models::{
    truncate_chars, ActionKind, AuditRecord, InboundMessage, ModerationConfig, ViolationKind,
    WarningRecord,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const UNMUTE_REASON: &str = "Automatic mute expired";

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

#[derive(Debug, Error)]
pub enum WarningStoreError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Persistence for per-(user, guild) warning counts.
#[async_trait]
pub trait WarningStore: Send + Sync {
    /// Increment the count for (user, guild), creating it at 1 if absent.
    /// Must be an atomic read-modify-write. Returns the updated record.
    async fn add_warning(
        &self,
        user_id: u64,
        guild_id: u64,
        violation: ViolationKind,
        at: DateTime<Utc>,
    ) -> Result<WarningRecord, WarningStoreError>;

    async fn get_warning(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<Option<WarningRecord>, WarningStoreError>;
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct EscalationEngine<W: WarningStore, G: ModerationGateway> {
    warnings: W,
    gateway: Arc<G>,
    config: ModerationConfig,
}

impl<W: WarningStore, G: ModerationGateway> EscalationEngine<W, G> {
    pub fn new(warnings: W, gateway: Arc<G>, config: ModerationConfig) -> Self {
        Self {
            warnings,
            gateway,
            config,
        }
    }

    /// Run the full escalation for `message` and return the audit record.
    ///
    /// Never fails: every step's error is absorbed or noted on the record.
    pub async fn handle_violation(
        &self,
        message: &InboundMessage,
        kind: ViolationKind,
    ) -> AuditRecord {
        let mut failures = Vec::new();

        if let Err(e) = self
            .gateway
            .delete_message(message.channel_id, message.message_id)
            .await
        {
            note_failure(&mut failures, "delete message", e);
        }

        let warning_count = match self
            .warnings
            .add_warning(message.author_id, message.guild_id, kind, message.received_at)
            .await
        {
            Ok(record) => Some(record.warnings),
            Err(e) => {
                tracing::warn!(
                    user_id = message.author_id,
                    guild_id = message.guild_id,
                    "Failed to record warning: {}",
                    e
                );
                failures.push(format!("record warning: {}", e));
                None
            }
        };

        let action = kind.action();
        match action {
            ActionKind::Warn => {}
            ActionKind::Mute => {
                let reason = format!("Automatic mute: {} violation", kind.as_str());
                self.mute(message.guild_id, message.author_id, &reason, &mut failures)
                    .await;
            }
            ActionKind::Ban => {
                let reason = format!("Automatic ban: {} violation", kind.as_str());
                if let Err(e) = self
                    .gateway
                    .ban_member(message.guild_id, message.author_id, &reason)
                    .await
                {
                    note_failure(&mut failures, "ban member", e);
                }
            }
        }

        AuditRecord {
            guild_id: message.guild_id,
            channel_id: message.channel_id,
            user_id: message.author_id,
            violation: kind,
            action,
            content: truncate_chars(&message.content, self.config.audit_content_max_chars)
                .to_string(),
            occurred_at: message.received_at,
            warning_count,
            failures,
        }
    }

    pub async fn warnings_for(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<Option<WarningRecord>, WarningStoreError> {
        self.warnings.get_warning(user_id, guild_id).await
    }

    async fn mute(
        &self,
        guild_id: u64,
        user_id: u64,
        reason: &str,
        failures: &mut Vec<String>,
    ) {
        let role_id = match self
            .gateway
            .ensure_muted_role(guild_id, &self.config.muted_role_name)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                note_failure(failures, "acquire muted role", e);
                return;
            }
        };

        if let Err(e) = self
            .gateway
            .add_role(guild_id, user_id, role_id, reason)
            .await
        {
            note_failure(failures, "apply muted role", e);
            return;
        }

        self.schedule_unmute(guild_id, user_id, role_id);
    }

    /// Spawn the deferred role removal. The task owns only the ids and a
    /// gateway handle, so it outlives the message handler that started it.
    fn schedule_unmute(&self, guild_id: u64, user_id: u64, role_id: u64) {
        let gateway = Arc::clone(&self.gateway);
        let cooldown = Duration::from_secs(self.config.mute_duration_secs);

        tokio::spawn(async move {
            tokio::time::sleep(cooldown).await;

            match gateway
                .remove_role(guild_id, user_id, role_id, UNMUTE_REASON)
                .await
            {
                Ok(()) => tracing::info!(user_id, guild_id, "Mute expired"),
                Err(e) if e.is_expected() => {
                    tracing::debug!(user_id, guild_id, "Unmute skipped: {}", e)
                }
                Err(e) => tracing::warn!(user_id, guild_id, "Failed to lift mute: {}", e),
            }
        });
    }
}

fn note_failure(failures: &mut Vec<String>, step: &str, error: GatewayError) {
    if error.is_expected() {
        tracing::debug!("Could not {}: {}", step, error);
    } else {
        tracing::warn!("Could not {}: {}", step, error);
        failures.push(format!("{}: {}", step, error));
    }
}

// ============================================================================
// TESTS
// ============================================================================
