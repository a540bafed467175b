pub mod ai_configs;
pub mod articles;
pub mod execution_history;
pub mod schedule_settings;
pub mod wordpress_configs;
