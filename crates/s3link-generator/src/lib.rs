pub mod error;
pub mod random;

pub use error::Error;
pub use random::{RandomGenerator, RandomGeneratorSettings};

use s3link_core::ShortCode;

/// Trait for generating candidate short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Candidates are not guaranteed to be unique; the allocator checks each
/// one against the store before committing it.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Draws the next candidate.
    fn generate(&self) -> Self::Output;
}
