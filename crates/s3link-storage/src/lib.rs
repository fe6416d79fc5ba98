//! Object store adapters for s3link.

pub mod memory;
pub mod s3;

pub use memory::InMemoryObjectStore;
pub use s3::{S3ObjectStore, S3Settings};
pub use s3link_core::store::{Acl, NewObject, ObjectStore, PutOutcome, Result, StoredObject};
pub use s3link_core::StorageError;
