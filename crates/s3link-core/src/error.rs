use thiserror::Error;

/// Errors raised while validating core values.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid lookup key: {0}")]
    InvalidLookupKey(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("invalid redirect template: {0}")]
    InvalidTemplate(String),
}

/// Failures reported by an [`ObjectStore`](crate::store::ObjectStore).
///
/// Absence is never an error: stores report it through `Option`/`bool`
/// return values instead.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage configuration error: {0}")]
    Config(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}
