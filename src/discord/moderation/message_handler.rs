// Discord-side entry point for automatic moderation.
//
// Translates a serenity message into the core `InboundMessage` and hands it to
// the engine. All decisions and platform actions happen in the core.

use crate::core::moderation::InboundMessage;
use crate::discord::Data;
use chrono::Utc;
use poise::serenity_prelude as serenity;

/// Extract the primitive fields the engine needs.
///
/// Direct messages have no guild and are never moderated.
pub fn to_inbound(msg: &serenity::Message) -> Option<InboundMessage> {
    let guild_id = msg.guild_id?.get();

    Some(InboundMessage {
        message_id: msg.id.get(),
        channel_id: msg.channel_id.get(),
        guild_id,
        author_id: msg.author.id.get(),
        author_is_bot: msg.author.bot,
        content: msg.content.clone(),
        mentioned_user_ids: msg.mentions.iter().map(|user| user.id.get()).collect(),
        received_at: Utc::now(),
    })
}

/// Run a message through the moderation pipeline.
///
/// Returns `true` if the message broke a rule and was handled.
pub async fn handle_message_for_moderation(msg: &serenity::Message, data: &Data) -> bool {
    let Some(inbound) = to_inbound(msg) else {
        return false;
    };

    data.moderation.process_message(&inbound).await.is_some()
}
