// Moderation domain models - data structures for the auto-moderation pipeline.
//
// These are pure domain types with no Discord dependencies.
// The Discord layer converts serenity messages into `InboundMessage` and
// renders `AuditRecord`s as embeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a rule-breaking message.
///
/// Listed in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// User sent too many messages inside the spam interval
    Spam,
    /// Message links to a blocklisted domain
    Scam,
    /// Message mentions too many distinct users
    MassMention,
    /// Message is mostly uppercase
    ExcessiveCaps,
}

impl ViolationKind {
    pub const ALL: [ViolationKind; 4] = [
        ViolationKind::Spam,
        ViolationKind::Scam,
        ViolationKind::MassMention,
        ViolationKind::ExcessiveCaps,
    ];

    /// Stable identifier used for storage and ban reasons.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::Spam => "spam",
            ViolationKind::Scam => "scam",
            ViolationKind::MassMention => "mass_mention",
            ViolationKind::ExcessiveCaps => "excessive_caps",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// The action bound to this violation by the fixed policy table.
    pub fn action(&self) -> ActionKind {
        match self {
            ViolationKind::Spam => ActionKind::Mute,
            ViolationKind::Scam => ActionKind::Ban,
            ViolationKind::MassMention => ActionKind::Warn,
            ViolationKind::ExcessiveCaps => ActionKind::Warn,
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::Spam => write!(f, "Spam"),
            ViolationKind::Scam => write!(f, "Scam"),
            ViolationKind::MassMention => write!(f, "Mass Mention"),
            ViolationKind::ExcessiveCaps => write!(f, "Excessive Caps"),
        }
    }
}

/// What the escalation engine does about a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Record a warning, nothing else
    Warn,
    /// Apply the muted role for the cooldown
    Mute,
    /// Permanently remove the user from the guild
    Ban,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Warn => write!(f, "Warn"),
            ActionKind::Mute => write!(f, "Mute"),
            ActionKind::Ban => write!(f, "Ban"),
        }
    }
}

/// Platform-neutral snapshot of an inbound chat message.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub message_id: u64,
    pub channel_id: u64,
    pub guild_id: u64,
    pub author_id: u64,
    pub author_is_bot: bool,
    pub content: String,
    /// Users mentioned in the message (may contain repeats)
    pub mentioned_user_ids: Vec<u64>,
    /// When the bot received the message
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    /// Number of distinct users mentioned.
    pub fn distinct_mentions(&self) -> usize {
        let mut ids = self.mentioned_user_ids.clone();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

/// Accumulated warnings for a user in one guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningRecord {
    pub user_id: u64,
    pub guild_id: u64,
    pub warnings: u32,
    pub last_warning: DateTime<Utc>,
    pub last_violation: ViolationKind,
}

/// Immutable snapshot of one moderation action, handed to the audit sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub guild_id: u64,
    pub channel_id: u64,
    pub user_id: u64,
    pub violation: ViolationKind,
    pub action: ActionKind,
    /// Offending message content, truncated
    pub content: String,
    pub occurred_at: DateTime<Utc>,
    /// Warning total after this violation, if recording it succeeded
    pub warning_count: Option<u32>,
    /// Unexpected platform or storage failures hit while escalating
    pub failures: Vec<String>,
}

impl AuditRecord {
    /// Copy of this record with `content` cut to at most `max_chars` characters.
    pub fn with_content_limit(&self, max_chars: usize) -> Self {
        Self {
            content: truncate_chars(&self.content, max_chars).to_string(),
            ..self.clone()
        }
    }
}

/// Cut `text` to at most `max_chars` characters without splitting a char.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Thresholds for the heuristics and escalation.
///
/// Heuristic thresholds. The defaults are the values the bot runs with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Maximum distinct mentions allowed in a single message
    pub max_mentions: usize,
    /// Sliding window length in seconds
    pub spam_interval_secs: u64,
    /// Maximum messages allowed inside the window
    pub max_messages: usize,
    /// Uppercase / total characters above which a message is shouting
    pub max_caps_ratio: f64,
    /// How long the muted role stays on (seconds)
    pub mute_duration_secs: u64,
    /// Maximum characters of message content kept in audit records
    pub audit_content_max_chars: usize,
    /// Name of the guild role used for mutes
    pub muted_role_name: String,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            max_mentions: 5,
            max_messages: 5,        // 5 messages...
            spam_interval_secs: 10, // ...in 10 seconds
            max_caps_ratio: 0.6,
            mute_duration_secs: 900, // 15 minute mute
            audit_content_max_chars: 1000,
            muted_role_name: "Muted".to_string(),
        }
    }
}
