// Discord moderation module
//
// Adapts serenity to the core moderation engine: the gateway implementation,
// embed formatting and the inbound message hook.

pub mod formatter;
pub mod gateway;
pub mod message_handler;

pub use gateway::SerenityGateway;
