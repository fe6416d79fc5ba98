use crate::error::Result;
use async_trait::async_trait;
use s3link_core::{LookupKey, ShortCode};

#[async_trait]
pub trait Allocator: Send + Sync + 'static {
    /// Returns the short code for `key`, allocating one on first use.
    ///
    /// Calling this again with the same key returns the same code.
    async fn allocate(&self, key: &LookupKey) -> Result<ShortCode>;

    /// Returns the short code already allocated for `key`, if any.
    /// Never writes.
    async fn resolve(&self, key: &LookupKey) -> Result<Option<ShortCode>>;
}
