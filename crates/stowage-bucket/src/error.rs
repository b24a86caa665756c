use thiserror::Error;

/// Errors shared by every storage backend.
#[derive(Debug, Error)]
pub enum BucketError {
    /// Required configuration is missing or invalid. Reported when the
    /// bucket is opened, before any network resource is touched.
    #[error("configuration error: {0}")]
    Config(String),

    /// No object is stored under the given key.
    #[error("no object stored under key: {0}")]
    NotFound(String),

    /// I/O failure while draining or feeding a byte stream.
    #[error("stream failure for key {key}: {source}")]
    Stream {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The gateway listener could not be started.
    #[error("gateway failed to start: {0}")]
    GatewayStart(#[source] std::io::Error),

    /// A stored value did not have the expected shape. Unreachable as long
    /// as a single producer type feeds the store, but reported as a typed
    /// error rather than a panic.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

/// Result alias for bucket operations.
pub type BucketResult<T> = Result<T, BucketError>;
