use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::io::AsyncRead;

use crate::error::BucketResult;

/// Boxed async byte stream handed across the contract boundary.
pub type ByteStream = Pin<Box<dyn AsyncRead + Send>>;

/// Common surface of every storage backend.
///
/// All implementations must satisfy these invariants:
/// - An upload followed by a download of the same key yields identical bytes,
///   regardless of which upload path (buffered or streamed) was used.
/// - The last write for a key wins; there is no version history.
/// - `delete` never fails on an absent key.
/// - Concurrent calls from multiple tasks are safe without external locking.
/// - Cancellation is cooperative: dropping a streaming operation's future
///   before completion must not leave a partially written object visible.
#[async_trait]
pub trait Bucket: Send + Sync {
    /// Remove the object stored under `key`. Idempotent.
    async fn delete(&self, key: &str) -> BucketResult<()>;

    /// Store `data` under `key`, replacing any previous object.
    async fn upload_bytes(&self, data: Bytes, key: &str) -> BucketResult<()>;

    /// Drain `reader` to exhaustion and store the assembled bytes under
    /// `key`. A source I/O error aborts the upload with
    /// [`BucketError::Stream`](crate::BucketError::Stream) and stores nothing.
    async fn upload_stream(&self, reader: ByteStream, key: &str) -> BucketResult<()>;

    /// Fetch the object stored under `key`.
    async fn download_bytes(&self, key: &str) -> BucketResult<Bytes>;

    /// Fetch the object stored under `key` as a readable stream.
    async fn download_stream(&self, key: &str) -> BucketResult<ByteStream>;

    /// Produce a URL from which the object can be fetched with a plain HTTP
    /// GET. The key must exist at call time. Whether `expires_at` is
    /// enforced is backend-specific; see the backend's documentation.
    async fn signed_get_url(&self, key: &str, expires_at: DateTime<Utc>)
        -> BucketResult<String>;
}
