//! Integration tests for the BucketView server.
//!
//! These tests require a running BucketView server (default
//! `http://localhost:5000`) configured against an S3-compatible endpoint
//! (default `http://localhost:4566`) with static `test`/`test` credentials.
//! The server lists one fixed bucket, so every test seeds its objects under
//! a unique top-level prefix and removes them afterwards.
//!
//! Run them with:
//! ```text
//! cargo test -p bucketview-integration -- --ignored
//! ```

use std::sync::Once;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL of the S3-compatible store.
fn endpoint_url() -> String {
    std::env::var("S3_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// Base URL of the BucketView server under test.
#[must_use]
pub fn server_url() -> String {
    std::env::var("BUCKETVIEW_URL").unwrap_or_else(|_| "http://localhost:5000".to_owned())
}

/// Bucket the server under test lists.
#[must_use]
pub fn bucket_name() -> String {
    std::env::var("BUCKET_NAME").unwrap_or_else(|_| "python-app-terraform".to_owned())
}

/// Create a configured S3 client pointing at the local store.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    init_tracing();

    let creds = Credentials::new("test", "test", None, None, "integration-test");

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// HTTP client for calling the server.
#[must_use]
pub fn http_client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// Generate a unique top-level prefix for a test.
#[must_use]
pub fn test_prefix(name: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{name}-{id}")
}

/// Make sure the listed bucket exists.
pub async fn ensure_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    if client.head_bucket().bucket(bucket).send().await.is_ok() {
        return;
    }
    // A concurrent test may have created it in the meantime.
    let _ = client.create_bucket().bucket(bucket).send().await;
}

/// Upload one small object per key under `prefix`.
pub async fn seed_objects(client: &aws_sdk_s3::Client, bucket: &str, prefix: &str, keys: &[&str]) {
    ensure_bucket(client, bucket).await;
    for key in keys {
        let key = format!("{prefix}/{key}");
        client
            .put_object()
            .bucket(bucket)
            .key(&key)
            .body(ByteStream::from_static(b"x"))
            .send()
            .await
            .unwrap_or_else(|e| panic!("put {key}: {e}"));
    }
}

/// Delete every object under `prefix`.
pub async fn cleanup_prefix(client: &aws_sdk_s3::Client, bucket: &str, prefix: &str) {
    let mut continuation_token = None;
    loop {
        let mut req = client.list_objects_v2().bucket(bucket).prefix(prefix);
        if let Some(token) = continuation_token.take() {
            req = req.continuation_token(token);
        }
        let Ok(resp) = req.send().await else {
            return;
        };

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                let _ = client.delete_object().bucket(bucket).key(key).send().await;
            }
        }

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(ToOwned::to_owned);
        } else {
            break;
        }
    }
}

/// `GET` a server path, returning the status and the parsed JSON body.
pub async fn get_json(path: &str) -> anyhow::Result<(reqwest::StatusCode, serde_json::Value)> {
    let resp = http_client()
        .get(format!("{}{path}", server_url()))
        .send()
        .await?;
    let status = resp.status();
    let body = resp.json().await?;
    Ok((status, body))
}

mod test_listing;
mod test_routes;
