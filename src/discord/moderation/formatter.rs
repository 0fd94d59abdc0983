// Embed formatting for moderation output.

use crate::core::moderation::{truncate_chars, AuditRecord};
use crate::core::reports::UserReport;
use chrono::{DateTime, Utc};
use poise::serenity_prelude::{self as serenity, CreateEmbed, CreateEmbedFooter};

/// Discord rejects embed field values over 1024 characters.
const FIELD_VALUE_MAX: usize = 1024;

fn timestamp(at: DateTime<Utc>) -> serenity::Timestamp {
    serenity::Timestamp::from_unix_timestamp(at.timestamp())
        .unwrap_or_else(|_| serenity::Timestamp::now())
}

fn field_text(text: &str) -> String {
    if text.trim().is_empty() {
        "*No content*".to_string()
    } else {
        truncate_chars(text, FIELD_VALUE_MAX).to_string()
    }
}

pub fn format_audit_record(record: &AuditRecord) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title("Security Alert")
        .color(serenity::Color::RED)
        .field(
            "User",
            format!("<@{}> ({})", record.user_id, record.user_id),
            true,
        )
        .field("Violation", record.violation.to_string(), true)
        .field("Action", record.action.to_string(), true)
        .field("Content", field_text(&record.content), false);

    if let Some(count) = record.warning_count {
        embed = embed.field("Warnings", count.to_string(), true);
    }

    if !record.failures.is_empty() {
        embed = embed.field("Failures", field_text(&record.failures.join("\n")), false);
    }

    embed
        .footer(CreateEmbedFooter::new(format!(
            "Guild ID: {} | Channel: {}",
            record.guild_id, record.channel_id
        )))
        .timestamp(timestamp(record.occurred_at))
}

pub fn format_user_report(report: &UserReport) -> CreateEmbed {
    CreateEmbed::default()
        .title("User Report")
        .color(serenity::Color::from_rgb(255, 165, 0)) // Orange
        .field("Reported User", format!("<@{}>", report.reported_user_id), true)
        .field("Reported By", format!("<@{}>", report.reporter_id), true)
        .field("Reason", field_text(&report.reason), false)
        .field("Message Content", field_text(&report.content), false)
        .footer(CreateEmbedFooter::new(format!("Guild ID: {}", report.guild_id)))
        .timestamp(serenity::Timestamp::now())
}
