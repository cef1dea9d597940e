//! Parent-configurable review intervals

pub mod models;
pub mod storage;

pub use models::{ParentSettings, SettingsForm};
pub use storage::SettingsStorage;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interval must be a whole number of days: {0:?}")]
    NotAnInteger(String),

    #[error("Intervals cannot be negative")]
    NegativeInterval,
}

pub type Result<T> = std::result::Result<T, SettingsError>;
