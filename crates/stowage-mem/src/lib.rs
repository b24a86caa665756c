//! In-process object-storage emulator for the stowage contract.
//!
//! Stands in for a real cloud bucket during tests and local development:
//! objects live in one process-wide in-memory store, and a background HTTP
//! gateway serves them so that signed URLs resolve like they would against a
//! real provider.
//!
//! # Modules
//!
//! - [`object`] -- the stored value type
//! - [`store`] -- concurrency-safe in-memory key/value store
//! - [`config`] -- gateway host/port read from the environment
//! - [`registry`] -- process-wide singleton and at-most-once gateway launch
//! - [`gateway`] -- axum router serving `GET /files?filename=<key>`
//! - [`bucket`] -- the [`Bucket`](stowage_bucket::Bucket) handle and
//!   [`open_bucket`]
//!
//! # Deliberate simplifications
//!
//! 1. One store per process: the bucket name passed to [`open_bucket`] does
//!    not partition storage. Handles opened under different names see the
//!    same objects.
//! 2. Signed URLs never expire and carry no credentials; a URL works for as
//!    long as the object exists.
//! 3. The gateway has no shutdown path. It runs on its own thread until
//!    process exit.
//!
//! These are load-bearing emulator semantics, not oversights; tests pin them.

pub mod bucket;
pub mod config;
pub mod gateway;
pub mod object;
pub mod registry;
pub mod store;

pub use bucket::{open_bucket, MemoryBucket};
pub use config::{GatewayConfig, GATEWAY_HOST_ENV, GATEWAY_PORT_ENV};
pub use gateway::{FILENAME_PARAM, FILES_ROUTE};
pub use object::Object;
pub use registry::ProcessRegistry;
pub use store::ObjectStore;
