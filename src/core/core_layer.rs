// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "moderation/mod.rs"]
pub mod moderation;

#[path = "settings/mod.rs"]
pub mod settings;

#[path = "reports/report_service.rs"]
pub mod reports;
