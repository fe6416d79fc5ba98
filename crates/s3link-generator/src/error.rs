use thiserror::Error;

/// Errors returned when building a generator from invalid settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("code length must be at least 1")]
    ZeroLength,
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("alphabet symbol {0:?} is not printable ASCII")]
    NonAsciiSymbol(char),
    #[error("alphabet symbol {0:?} appears more than once")]
    DuplicateSymbol(char),
}
