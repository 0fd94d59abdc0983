use serde::{Deserialize, Serialize};

/// Per-guild moderation settings written by `/setup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildSettings {
    pub guild_id: u64,
    /// Channel that receives audit records and user reports
    pub log_channel_id: Option<u64>,
    /// Role allowed to manage the scam blocklist
    pub admin_role_id: Option<u64>,
}
