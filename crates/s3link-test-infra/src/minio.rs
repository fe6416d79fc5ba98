use crate::{Result, TestInfraError};
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MINIO_IMAGE: &str = "minio/minio";
// Conditional PutObject (If-None-Match / If-Match) needs a 2024 or later release.
const MINIO_TAG: &str = "RELEASE.2025-04-22T22-12-26Z";
const MINIO_PORT: u16 = 9000;

#[derive(TypedBuilder)]
pub struct MinioConfig {
    #[builder(default = "s3link-access-key".to_string())]
    access_key: String,
    #[builder(default = "s3link-secret-key".to_string())]
    secret_key: String,
    #[builder(default = "us-east-1".to_string())]
    region: String,
}

/// Test fixture for a disposable MinIO server.
pub struct MinioServer {
    container: ContainerAsync<GenericImage>,
    config: MinioConfig,
}

impl MinioServer {
    /// Starts a MinIO container suitable for integration tests.
    pub async fn new(config: MinioConfig) -> Result<Self> {
        let container = GenericImage::new(MINIO_IMAGE, MINIO_TAG)
            .with_exposed_port(MINIO_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("API:"))
            .with_env_var("MINIO_ROOT_USER", config.access_key.as_str())
            .with_env_var("MINIO_ROOT_PASSWORD", config.secret_key.as_str())
            .with_cmd(vec!["server", "/data"])
            .start()
            .await?;

        Ok(Self { container, config })
    }

    pub async fn endpoint(&self) -> Result<String> {
        let host = self.container.get_host().await?;
        let port = self.container.get_host_port_ipv4(MINIO_PORT.tcp()).await?;
        Ok(format!("http://{host}:{port}"))
    }

    /// Builds a path-style client authenticated as the root user.
    pub async fn client(&self) -> Result<Client> {
        let credentials = Credentials::new(
            self.config.access_key.clone(),
            self.config.secret_key.clone(),
            None,
            None,
            "s3link-test-infra",
        );
        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(self.config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(self.endpoint().await?)
            .force_path_style(true)
            .build();

        Ok(Client::from_conf(config))
    }

    /// Creates `bucket` and returns a client that can use it.
    pub async fn create_bucket(&self, bucket: &str) -> Result<Client> {
        let client = self.client().await?;
        client
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| TestInfraError::S3(format!("create bucket {bucket}: {}", DisplayErrorContext(&e))))?;
        Ok(client)
    }
}
