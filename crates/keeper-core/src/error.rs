//! Error types for Keeper

use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeeperError>;

#[derive(Error, Debug)]
pub enum KeeperError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Todo not found: {0}")]
    NotFound(i64),

    #[error("Store operation timed out")]
    Timeout,

    #[error("Store error: {0}")]
    Store(String),
}

impl KeeperError {
    /// Connectivity, timeout and execution failures of the store
    pub fn is_store_error(&self) -> bool {
        matches!(self, KeeperError::Timeout | KeeperError::Store(_))
    }
}

impl From<serde_json::Error> for KeeperError {
    fn from(e: serde_json::Error) -> Self {
        KeeperError::InvalidInput(e.to_string())
    }
}

impl From<std::num::ParseIntError> for KeeperError {
    fn from(e: std::num::ParseIntError) -> Self {
        KeeperError::InvalidInput(e.to_string())
    }
}
