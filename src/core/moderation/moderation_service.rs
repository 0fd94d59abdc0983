// Moderation engine - core business logic for automatic moderation.
//
// This service owns all moderation state:
// - Rate tracker (per-user sliding windows)
// - Scam domain blocklist
// - Escalation engine (delete -> warn/mute/ban)
// - Audit sink
//
// One instance is created at start-up and shared via `Arc`.
// NO Discord dependencies here - the platform sits behind `ModerationGateway`.

use super::audit_sink::AuditSink;
use super::blocklist::{normalize_domain, BlocklistError, BlocklistStore, DomainBlocklist};
use super::classifier::classify;
use super::escalation::{EscalationEngine, WarningStore, WarningStoreError};
use super::gateway::ModerationGateway;
use super::moderation_models::{AuditRecord, InboundMessage, ModerationConfig, WarningRecord};
use super::rate_tracker::RateTracker;
use crate::core::settings::{GuildSettingsService, GuildSettingsStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Result of a blocklist edit. `domain` is the hostname as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainUpdate {
    pub domain: String,
    pub changed: bool,
}

pub struct ModerationEngine<B, W, S, G>
where
    B: BlocklistStore,
    W: WarningStore,
    S: GuildSettingsStore,
    G: ModerationGateway,
{
    config: ModerationConfig,
    tracker: RateTracker,
    blocklist: DomainBlocklist<B>,
    escalation: EscalationEngine<W, G>,
    audit: AuditSink<G>,
    settings: Arc<GuildSettingsService<S>>,
}

impl<B, W, S, G> ModerationEngine<B, W, S, G>
where
    B: BlocklistStore,
    W: WarningStore,
    S: GuildSettingsStore,
    G: ModerationGateway,
{
    pub fn new(
        config: ModerationConfig,
        blocklist: DomainBlocklist<B>,
        warnings: W,
        settings: Arc<GuildSettingsService<S>>,
        gateway: Arc<G>,
    ) -> Self {
        Self {
            tracker: RateTracker::new(config.spam_interval_secs, config.max_messages),
            blocklist,
            escalation: EscalationEngine::new(warnings, Arc::clone(&gateway), config.clone()),
            audit: AuditSink::new(gateway, config.audit_content_max_chars),
            settings,
            config,
        }
    }

    /// Run one inbound message through the pipeline.
    ///
    /// Returns the audit record when the message broke a rule and was acted
    /// on, `None` for normal traffic. Bot authors are never moderated.
    pub async fn process_message(&self, message: &InboundMessage) -> Option<AuditRecord> {
        if message.author_is_bot {
            return None;
        }

        let kind = classify(message, &self.tracker, &self.blocklist, &self.config).await?;

        tracing::info!(
            user_id = message.author_id,
            guild_id = message.guild_id,
            violation = kind.as_str(),
            action = %kind.action(),
            "Violation detected"
        );

        let record = self.escalation.handle_violation(message, kind).await;
        let destination = self.settings.log_channel(message.guild_id).await;
        self.audit.deliver(&record, destination).await;

        Some(record)
    }

    /// Add a domain to the scam blocklist. `changed` is `false` if already listed.
    pub async fn add_domain(&self, raw: &str) -> Result<DomainUpdate, BlocklistError> {
        let domain =
            normalize_domain(raw).ok_or_else(|| BlocklistError::InvalidDomain(raw.into()))?;
        let changed = self.blocklist.add(&domain).await?;
        Ok(DomainUpdate { domain, changed })
    }

    /// Remove a domain from the scam blocklist. `changed` is `false` if not listed.
    pub async fn remove_domain(&self, raw: &str) -> Result<DomainUpdate, BlocklistError> {
        let domain =
            normalize_domain(raw).ok_or_else(|| BlocklistError::InvalidDomain(raw.into()))?;
        let changed = self.blocklist.remove(&domain).await?;
        Ok(DomainUpdate { domain, changed })
    }

    pub async fn is_blocked_domain(&self, domain: &str) -> bool {
        self.blocklist.contains(domain).await
    }

    pub async fn blocked_domain_count(&self) -> usize {
        self.blocklist.len().await
    }

    pub async fn warnings_for(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<Option<WarningRecord>, WarningStoreError> {
        self.escalation.warnings_for(user_id, guild_id).await
    }

    /// Forget rate windows nobody has written to recently.
    pub fn prune_idle_windows(&self, now: DateTime<Utc>) -> usize {
        self.tracker.prune_idle(now)
    }
}

// ============================================================================
// TESTS
// ============================================================================
