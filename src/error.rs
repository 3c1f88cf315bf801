
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HerbariumError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, HerbariumError>;

// Helper conversions
impl From<rusqlite::Error> for HerbariumError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}

impl From<config::ConfigError> for HerbariumError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
