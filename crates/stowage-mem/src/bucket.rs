use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use tokio::io::AsyncReadExt;
use tracing::debug;

use stowage_bucket::{Bucket, BucketError, BucketResult, ByteStream};

use crate::config::GatewayConfig;
use crate::gateway::{FILENAME_PARAM, FILES_ROUTE};
use crate::object::Object;
use crate::registry::ProcessRegistry;
use crate::store::ObjectStore;

/// Copy-buffer size for streamed uploads.
const COPY_CHUNK: usize = 32;

/// Open a bucket handle onto the process-shared emulator store.
///
/// The first open in a process reads the gateway configuration from the
/// environment, creates the shared store, and starts the HTTP gateway; later
/// opens reuse both. Missing configuration fails here, before any network
/// resource is touched.
///
/// The `bucket_name` argument exists for contract parity only: all handles
/// in a process share one store regardless of the name they were opened
/// with. Callers needing isolation must namespace their keys.
pub async fn open_bucket(bucket_name: &str) -> BucketResult<MemoryBucket> {
    let config = GatewayConfig::from_env()?;
    let registry = ProcessRegistry::global();
    let addr = registry.ensure_gateway_started(&config)?;
    debug!(bucket_name, %addr, "opened in-memory bucket");
    Ok(MemoryBucket {
        store: registry.store(),
        base_url: format!("http://{}:{}", config.host, addr.port()),
    })
}

/// Handle implementing the storage contract against the shared store.
///
/// Cheap to create and to clone; all clones and all other handles observe
/// the same objects. Signed URLs produced by this backend never expire: the
/// expiry argument is accepted for contract parity but the gateway does not
/// enforce it.
#[derive(Clone, Debug)]
pub struct MemoryBucket {
    store: Arc<ObjectStore>,
    base_url: String,
}

impl MemoryBucket {
    /// Base URL of the gateway this handle signs URLs for.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Bucket for MemoryBucket {
    async fn delete(&self, key: &str) -> BucketResult<()> {
        // Idempotent: removing an absent key is not an error.
        self.store.delete(key);
        Ok(())
    }

    async fn upload_bytes(&self, data: Bytes, key: &str) -> BucketResult<()> {
        self.store.put(Object::new(key, data));
        Ok(())
    }

    async fn upload_stream(&self, mut reader: ByteStream, key: &str) -> BucketResult<()> {
        let mut assembled = BytesMut::new();
        let mut chunk = [0u8; COPY_CHUNK];
        loop {
            let n = reader
                .read(&mut chunk)
                .await
                .map_err(|source| BucketError::Stream {
                    key: key.to_string(),
                    source,
                })?;
            if n == 0 {
                break;
            }
            assembled.extend_from_slice(&chunk[..n]);
        }
        // Nothing is visible in the store until the source is exhausted.
        self.store.put(Object::new(key, assembled.freeze()));
        Ok(())
    }

    async fn download_bytes(&self, key: &str) -> BucketResult<Bytes> {
        self.store
            .get(key)
            .map(|object| object.content)
            .ok_or_else(|| BucketError::NotFound(key.to_string()))
    }

    async fn download_stream(&self, key: &str) -> BucketResult<ByteStream> {
        let object = self
            .store
            .get(key)
            .ok_or_else(|| BucketError::NotFound(key.to_string()))?;
        Ok(Box::pin(Cursor::new(object.content)))
    }

    async fn signed_get_url(
        &self,
        key: &str,
        _expires_at: DateTime<Utc>,
    ) -> BucketResult<String> {
        // Existence is checked eagerly; the gateway never re-checks expiry.
        if !self.store.contains(key) {
            return Err(BucketError::NotFound(key.to_string()));
        }
        Ok(format!(
            "{}{}?{}={}",
            self.base_url,
            FILES_ROUTE,
            FILENAME_PARAM,
            urlencoding::encode(key)
        ))
    }
}
