// Discord commands module.
// Each feature gets its own command file.

pub mod checks;

pub mod report;

pub mod scam_domains;

pub mod setup;

pub mod warnings;

// Bot presence on ready
pub mod presence;
