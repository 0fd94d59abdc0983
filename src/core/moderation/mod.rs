// Core moderation module - classification, escalation and audit logic.
// Same layout as the other core modules: models, ports, services.

pub mod audit_sink;
pub mod blocklist;
pub mod classifier;
pub mod escalation;
pub mod gateway;
pub mod moderation_models;
pub mod moderation_service;
pub mod rate_tracker;

#[cfg(test)]
pub mod test_support;

pub use blocklist::{BlocklistError, BlocklistStore, DomainBlocklist};
pub use escalation::{WarningStore, WarningStoreError};
pub use gateway::{GatewayError, ModerationGateway};
pub use moderation_models::*;
pub use moderation_service::{DomainUpdate, ModerationEngine};
