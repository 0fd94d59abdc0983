// User reports - a member flags a message for the moderators.
//
// The Discord layer fetches the message and delivers the report; this module
// only validates input and shapes the report.

use crate::core::moderation::truncate_chars;
use thiserror::Error;

/// Embed fields cap out at 1024 characters.
const REPORT_CONTENT_MAX_CHARS: usize = 1000;

#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error("Invalid message id: {0:?}")]
    InvalidMessageId(String),
}

/// Parse a user-supplied message id. Ids are non-zero integers.
pub fn parse_message_id(raw: &str) -> Result<u64, ReportError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(ReportError::InvalidMessageId(raw.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserReport {
    pub guild_id: u64,
    pub reporter_id: u64,
    pub reported_user_id: u64,
    pub reason: String,
    pub content: String,
}

impl UserReport {
    pub fn new(
        guild_id: u64,
        reporter_id: u64,
        reported_user_id: u64,
        reason: &str,
        content: &str,
    ) -> Self {
        Self {
            guild_id,
            reporter_id,
            reported_user_id,
            reason: truncate_chars(reason, REPORT_CONTENT_MAX_CHARS).to_string(),
            content: truncate_chars(content, REPORT_CONTENT_MAX_CHARS).to_string(),
        }
    }
}
