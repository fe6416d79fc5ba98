//! Core types and traits for s3link.
//!
//! This crate provides the types shared by the allocator, the code
//! generators and the object store adapters.

pub mod error;
pub mod lookup_key;
pub mod shortcode;
pub mod store;
pub mod template;

pub use error::{CoreError, StorageError};
pub use lookup_key::LookupKey;
pub use shortcode::ShortCode;
pub use store::{Acl, NewObject, ObjectStore, PutOutcome, StoredObject};
pub use template::RedirectTemplate;
