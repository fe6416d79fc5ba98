use crate::error::StorageError;
use async_trait::async_trait;

/// Result type for object store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Access level applied to a written object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acl {
    /// Readable only with bucket credentials.
    Private,
    /// Readable anonymously, so browsers can follow the redirect.
    PublicRead,
}

/// An object to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewObject {
    /// The object payload.
    pub body: Vec<u8>,
    /// Access level of the object.
    pub acl: Acl,
    /// Website redirect location stored as object metadata.
    pub redirect_location: Option<String>,
}

impl NewObject {
    /// A private object carrying `body` and no redirect metadata.
    pub fn private(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            acl: Acl::Private,
            redirect_location: None,
        }
    }

    /// An empty public object redirecting browsers to `location`.
    pub fn public_redirect(location: impl Into<String>) -> Self {
        Self {
            body: Vec::new(),
            acl: Acl::PublicRead,
            redirect_location: Some(location.into()),
        }
    }
}

/// An object read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// The object payload.
    pub body: Vec<u8>,
    /// Entity tag of this version of the object, used by [`ObjectStore::put_if_match`].
    pub etag: String,
}

/// Outcome of a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The precondition held and the object was written.
    Written,
    /// An object already existed under the key; nothing was written.
    AlreadyExists,
    /// The object changed or vanished since it was read; nothing was written.
    Modified,
}

/// A key/value blob store bound to a single bucket.
///
/// Absence is reported through return values, never as an error.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Reads the object at `key` together with its entity tag.
    /// Returns `None` if the object does not exist.
    async fn get(&self, key: &str) -> Result<Option<StoredObject>>;

    /// Writes `object` at `key`, replacing any existing object.
    async fn put(&self, key: &str, object: NewObject) -> Result<()>;

    /// Writes `object` at `key` only if no object exists there yet.
    async fn put_if_absent(&self, key: &str, object: NewObject) -> Result<PutOutcome>;

    /// Replaces the object at `key` only if its entity tag still equals `etag`.
    async fn put_if_match(&self, key: &str, object: NewObject, etag: &str) -> Result<PutOutcome>;

    /// Checks whether an object exists at `key` without reading its body.
    async fn exists(&self, key: &str) -> Result<bool>;
}
