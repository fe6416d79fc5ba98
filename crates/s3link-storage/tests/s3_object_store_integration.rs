use aws_sdk_s3::Client;
use s3link_storage::{NewObject, ObjectStore, PutOutcome, S3ObjectStore};
use s3link_test_infra::minio::{MinioConfig, MinioServer};
use s3link_test_infra::should_skip_s3_tests;

const BUCKET: &str = "s3link-test";

struct Fixture {
    _minio: MinioServer,
    client: Client,
    store: S3ObjectStore,
}

impl Fixture {
    /// Returns `None` when S3 tests are disabled or no container runtime is available.
    async fn start() -> Option<Self> {
        if should_skip_s3_tests() {
            return None;
        }

        let minio = match MinioServer::new(MinioConfig::builder().build()).await {
            Ok(minio) => minio,
            Err(err) => {
                eprintln!("Skipping S3 test: {err}");
                return None;
            }
        };
        let client = minio.create_bucket(BUCKET).await.expect("create bucket");

        Some(Self {
            _minio: minio,
            store: S3ObjectStore::new(client.clone(), BUCKET),
            client,
        })
    }

    async fn redirect_location(&self, key: &str) -> Option<String> {
        self.client
            .head_object()
            .bucket(BUCKET)
            .key(key)
            .send()
            .await
            .expect("head object")
            .website_redirect_location
    }
}

#[tokio::test]
async fn missing_key_is_absent() {
    let Some(fixture) = Fixture::start().await else {
        return;
    };

    assert_eq!(fixture.store.get("state/cats").await.unwrap(), None);
    assert!(!fixture.store.exists("AbCdEf").await.unwrap());
}

#[tokio::test]
async fn put_then_get_returns_body_and_etag() {
    let Some(fixture) = Fixture::start().await else {
        return;
    };

    fixture
        .store
        .put("state/cats", NewObject::private("AbCdEf"))
        .await
        .unwrap();

    let object = fixture.store.get("state/cats").await.unwrap().unwrap();
    assert_eq!(object.body, b"AbCdEf");
    assert!(!object.etag.is_empty());
    assert!(fixture.store.exists("state/cats").await.unwrap());
}

#[tokio::test]
async fn put_if_absent_second_write_is_rejected() {
    let Some(fixture) = Fixture::start().await else {
        return;
    };

    let first = fixture
        .store
        .put_if_absent("state/cats", NewObject::private("first"))
        .await
        .unwrap();
    let second = fixture
        .store
        .put_if_absent("state/cats", NewObject::private("second"))
        .await
        .unwrap();

    assert_eq!(first, PutOutcome::Written);
    assert_eq!(second, PutOutcome::AlreadyExists);
    let object = fixture.store.get("state/cats").await.unwrap().unwrap();
    assert_eq!(object.body, b"first");
}

#[tokio::test]
async fn put_if_match_requires_current_etag() {
    let Some(fixture) = Fixture::start().await else {
        return;
    };
    fixture
        .store
        .put("state/cats", NewObject::private(""))
        .await
        .unwrap();
    let placeholder = fixture.store.get("state/cats").await.unwrap().unwrap();

    let written = fixture
        .store
        .put_if_match("state/cats", NewObject::private("Winner"), &placeholder.etag)
        .await
        .unwrap();
    let stale = fixture
        .store
        .put_if_match("state/cats", NewObject::private("Loser1"), &placeholder.etag)
        .await
        .unwrap();

    assert_eq!(written, PutOutcome::Written);
    assert_eq!(stale, PutOutcome::Modified);
    let object = fixture.store.get("state/cats").await.unwrap().unwrap();
    assert_eq!(object.body, b"Winner");
}

#[tokio::test]
async fn redirect_object_carries_location() {
    let Some(fixture) = Fixture::start().await else {
        return;
    };

    fixture
        .store
        .put("AbCdEf", NewObject::public_redirect("https://x/?s=cats"))
        .await
        .unwrap();

    assert_eq!(
        fixture.redirect_location("AbCdEf").await.as_deref(),
        Some("https://x/?s=cats")
    );
    let object = fixture.store.get("AbCdEf").await.unwrap().unwrap();
    assert!(object.body.is_empty());
}
