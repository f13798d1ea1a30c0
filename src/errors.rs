use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Error type covering request validation and data source failures.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Household not found: {0}")]
    HouseholdNotFound(Uuid),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, ProjectionError>;

impl From<std::io::Error> for ProjectionError {
    fn from(err: std::io::Error) -> Self {
        ProjectionError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ProjectionError {
    fn from(err: serde_json::Error) -> Self {
        ProjectionError::Serialization(err.to_string())
    }
}
