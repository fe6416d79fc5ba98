//! Disposable containers for s3link integration tests.

pub mod error;
pub mod minio;

pub use error::{Result, TestInfraError};

/// Set `SKIP_S3_TESTS` to skip every test that needs a MinIO container.
pub fn should_skip_s3_tests() -> bool {
    std::env::var("SKIP_S3_TESTS").is_ok()
}
