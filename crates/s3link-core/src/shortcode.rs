use crate::error::{CoreError, Result, StorageError};
use std::fmt::Display;

/// A short code addressing a redirect object in the bucket.
///
/// Short codes are used verbatim as object keys, so they must be
/// 1-1024 bytes long and free of control characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

const MAX_LENGTH: usize = 1024;

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators drawing from a fixed ASCII alphabet).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Decodes the body of a state record.
    ///
    /// An empty body is a placeholder left by an interrupted write and
    /// decodes to `None`. Any other body is taken verbatim, without the
    /// checks [`ShortCode::new`] applies, because it was committed by an
    /// earlier allocation and already names an object in the bucket.
    pub fn from_state_record(body: &[u8]) -> std::result::Result<Option<Self>, StorageError> {
        if body.is_empty() {
            return Ok(None);
        }

        let code = std::str::from_utf8(body).map_err(|e| {
            StorageError::InvalidData(format!("state record is not valid UTF-8: {e}"))
        })?;
        Ok(Some(Self::new_unchecked(code)))
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the length of the short code in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for validated codes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validate(code: &str) -> Result<()> {
        if code.is_empty() || code.len() > MAX_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be between 1 and {}, got {}",
                MAX_LENGTH,
                code.len()
            )));
        }

        if code.chars().any(char::is_control) {
            return Err(CoreError::InvalidShortCode(format!(
                "must not contain control characters: {:?}",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
