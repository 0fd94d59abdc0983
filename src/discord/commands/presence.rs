// This module handles bot presence and lifecycle events.
//
// Discord-layer glue only: we work with SDK types (Context, ActivityData,
// OnlineStatus) and keep the logic short.

use poise::serenity_prelude as serenity;

/// Show that the bot is on watch.
pub fn reset_status(ctx: &serenity::Context) {
    let activity = serenity::ActivityData::watching("for suspicious activity");
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

/// Called once the bot is ready so we can announce a default presence message
/// without repeating the setup code at every call site.
pub fn on_ready(ctx: &serenity::Context) {
    reset_status(ctx);
}
