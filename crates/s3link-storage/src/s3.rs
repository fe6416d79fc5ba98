//! S3-compatible object store using the AWS SDK.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::put_object::builders::PutObjectFluentBuilder;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use s3link_core::store::{Acl, NewObject, ObjectStore, PutOutcome, Result, StoredObject};
use s3link_core::StorageError;
use tracing::{instrument, trace};

/// Connection settings for [`S3ObjectStore::connect`].
#[derive(Debug, Clone)]
pub struct S3Settings {
    /// Bucket every key is resolved against.
    pub bucket: String,
    /// AWS region of the bucket.
    pub region: String,
    /// Custom endpoint for S3-compatible services. Enables path-style addressing.
    pub endpoint: Option<String>,
}

/// Object store backed by a single S3 bucket.
///
/// Credentials come from the default AWS provider chain.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl std::fmt::Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl S3ObjectStore {
    /// Creates a store from an existing client.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Builds a client from the ambient AWS configuration and the given settings.
    pub async fn connect(settings: S3Settings) -> Result<Self> {
        if settings.bucket.is_empty() {
            return Err(StorageError::Config("bucket must not be empty".to_string()));
        }
        if settings.region.is_empty() {
            return Err(StorageError::Config("region must not be empty".to_string()));
        }

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(settings.region));
        if let Some(endpoint) = settings.endpoint.as_deref() {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.endpoint.is_some())
            .build();

        Ok(Self::new(Client::from_conf(s3_config), settings.bucket))
    }

    fn put_request(&self, key: &str, object: NewObject) -> PutObjectFluentBuilder {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .acl(canned_acl(object.acl))
            .set_website_redirect_location(object.redirect_location)
            .body(ByteStream::from(object.body))
    }
}

fn canned_acl(acl: Acl) -> ObjectCannedAcl {
    match acl {
        Acl::Private => ObjectCannedAcl::Private,
        Acl::PublicRead => ObjectCannedAcl::PublicRead,
    }
}

fn service_status<E>(err: &SdkError<E>) -> Option<u16> {
    match err {
        SdkError::ServiceError(service_err) => Some(service_err.raw().status().as_u16()),
        _ => None,
    }
}

fn map_sdk_error<E>(err: SdkError<E>, key: &str) -> StorageError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let message = format!("{key}: {}", DisplayErrorContext(&err));

    match err {
        SdkError::TimeoutError(_) => StorageError::Timeout(message),
        SdkError::DispatchFailure(_) => StorageError::Unavailable(message),
        SdkError::ConstructionFailure(_) => StorageError::Config(message),
        _ => StorageError::Operation(message),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self), fields(backend = "s3"))]
    async fn get(&self, key: &str) -> Result<Option<StoredObject>> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) if service_status(&err) == Some(404) => {
                trace!("object not found");
                return Ok(None);
            }
            Err(err) => return Err(map_sdk_error(err, key)),
        };

        let etag = output
            .e_tag
            .ok_or_else(|| StorageError::InvalidData(format!("{key}: response carried no ETag")))?;
        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Unavailable(format!("{key}: reading body failed: {e}")))?
            .into_bytes();

        Ok(Some(StoredObject {
            body: body.to_vec(),
            etag,
        }))
    }

    #[instrument(skip(self, object), fields(backend = "s3", size = object.body.len()))]
    async fn put(&self, key: &str, object: NewObject) -> Result<()> {
        self.put_request(key, object)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, key))?;
        Ok(())
    }

    #[instrument(skip(self, object), fields(backend = "s3", size = object.body.len()))]
    async fn put_if_absent(&self, key: &str, object: NewObject) -> Result<PutOutcome> {
        // `If-None-Match: *` makes S3 reject the write with 412 when the key
        // exists, and 409 when a concurrent conditional write is in flight.
        match self.put_request(key, object).if_none_match("*").send().await {
            Ok(_) => Ok(PutOutcome::Written),
            Err(err) if matches!(service_status(&err), Some(409 | 412)) => {
                trace!("conditional write rejected, object exists");
                Ok(PutOutcome::AlreadyExists)
            }
            Err(err) => Err(map_sdk_error(err, key)),
        }
    }

    #[instrument(skip(self, object), fields(backend = "s3", size = object.body.len()))]
    async fn put_if_match(&self, key: &str, object: NewObject, etag: &str) -> Result<PutOutcome> {
        // 412 means the ETag no longer matches, 404 that the object was
        // deleted since it was read.
        match self.put_request(key, object).if_match(etag).send().await {
            Ok(_) => Ok(PutOutcome::Written),
            Err(err) if matches!(service_status(&err), Some(404 | 409 | 412)) => {
                trace!("conditional write rejected, object changed");
                Ok(PutOutcome::Modified)
            }
            Err(err) => Err(map_sdk_error(err, key)),
        }
    }

    #[instrument(skip(self), fields(backend = "s3"))]
    async fn exists(&self, key: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) if service_status(&err) == Some(404) => Ok(false),
            Err(err) => Err(map_sdk_error(err, key)),
        }
    }
}
