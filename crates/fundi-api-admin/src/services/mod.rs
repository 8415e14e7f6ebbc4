//! Services for the admin API.

pub mod category_service;
pub mod moderation_service;
pub mod stats_service;

pub use category_service::CategoryService;
pub use moderation_service::ModerationService;
pub use stats_service::StatsService;
