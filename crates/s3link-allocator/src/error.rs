use s3link_core::{CoreError, StorageError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AllocatorError>;

#[derive(Debug, Clone, Error)]
pub enum AllocatorError {
    #[error("invalid lookup key: {0}")]
    InvalidLookupKey(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("state record for '{key}' points at '{code}' but the redirect object was not written: {source}")]
    PartialCommit {
        key: String,
        code: String,
        #[source]
        source: StorageError,
    },
    #[error("lookup key '{0}' was claimed concurrently but no short code could be read back")]
    Conflict(String),
    #[error("no free short code found after {attempts} attempts")]
    IdentifierSpaceExhausted { attempts: usize },
}

impl From<CoreError> for AllocatorError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidLookupKey(message) => Self::InvalidLookupKey(message),
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
            CoreError::InvalidTemplate(message) => Self::Configuration(message),
        }
    }
}
