/// Currency allow-list loading from config.toml
pub mod currencies;

/// Database configuration and connection management
pub mod database;
