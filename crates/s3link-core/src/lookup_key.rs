use crate::error::{CoreError, Result};
use std::fmt::Display;

/// The caller-supplied key a short code is allocated for.
///
/// The key is opaque; the only rule enforced here is that it is not empty.
/// The object store namespace constrains legal characters transitively.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    /// Creates a new `LookupKey`, rejecting the empty string.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(CoreError::InvalidLookupKey(
                "lookup key cannot be empty".to_string(),
            ));
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Object key of the state record for this lookup key.
    pub fn state_key(&self, state_prefix: &str) -> String {
        format!("{}{}", state_prefix, self.0)
    }
}

impl Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for LookupKey {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}
