//! Presigned URLs authorizing a single object upload.
//!
//! Signing happens locally against the client's resolved credentials; no
//! request reaches the storage service until the URL is used.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use tracing::debug;

/// Lifetime of every minted upload URL.
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub bucket: String,
    pub key: String,
}

pub async fn presign_upload(client: &aws_sdk_s3::Client, target: &UploadTarget) -> Result<String> {
    let presigning =
        PresigningConfig::expires_in(UPLOAD_URL_TTL).context("invalid presigning expiry")?;

    let request = client
        .put_object()
        .bucket(&target.bucket)
        .key(&target.key)
        .presigned(presigning)
        .await
        .map_err(|error| {
            anyhow!(
                "failed to presign upload to s3://{}/{}: {}",
                target.bucket,
                target.key,
                DisplayErrorContext(&error)
            )
        })?;

    debug!(
        bucket = %target.bucket,
        key = %target.key,
        expires_in_secs = UPLOAD_URL_TTL.as_secs(),
        "presigned upload url"
    );
    Ok(request.uri().to_string())
}
