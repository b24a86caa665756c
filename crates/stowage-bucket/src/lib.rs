//! Provider-agnostic object-storage contract.
//!
//! Every storage backend — the in-process emulator in `stowage-mem` as well
//! as out-of-tree adapters over cloud vendor SDKs — exposes the same surface:
//! an `open_bucket` constructor returning a type that implements [`Bucket`].
//! The backend is selected by the crate you open the bucket through, never by
//! a runtime switch.
//!
//! # Contract rules
//!
//! 1. Object content is opaque bytes; the contract models no metadata.
//! 2. `delete` is idempotent: deleting an absent key succeeds.
//! 3. `download_bytes`/`download_stream`/`signed_get_url` report an absent
//!    key as [`BucketError::NotFound`].
//! 4. All failures are returned as typed errors, never panics.
//! 5. Backends must add `let _: Box<dyn Bucket> = ...` coverage in their
//!    tests so the trait stays object-safe.

pub mod error;
pub mod traits;

pub use error::{BucketError, BucketResult};
pub use traits::{Bucket, ByteStream};
