//! Short link allocation on top of an object store.
//!
//! [`LinkAllocator`] maps lookup keys to short codes. The first allocation
//! for a key writes a private state record (`state/<key>` holding the code)
//! and a public redirect object at the code; later allocations for the same
//! key read the state record back and write nothing.
//!
//! ```rust
//! use s3link_allocator::{Allocator, AllocatorSettings, LinkAllocator};
//! use s3link_core::{LookupKey, RedirectTemplate};
//! use s3link_generator::{RandomGenerator, RandomGeneratorSettings};
//! use s3link_storage::InMemoryObjectStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = AllocatorSettings::builder()
//!     .redirect_template(RedirectTemplate::parse("https://example.com/?s=%s")?)
//!     .build();
//! let generator = RandomGenerator::new(RandomGeneratorSettings::default())?;
//! let allocator = LinkAllocator::new(InMemoryObjectStore::new(), generator, settings)?;
//!
//! let key = LookupKey::new("cats")?;
//! let code = allocator.allocate(&key).await?;
//! assert_eq!(allocator.allocate(&key).await?, code);
//! # Ok(())
//! # }
//! ```

pub mod allocator;
pub mod error;
pub mod service;

pub use allocator::Allocator;
pub use error::{AllocatorError, Result};
pub use service::{AllocatorSettings, LinkAllocator};
