//! Uniicon Storage Library
//!
//! Archive storage for generated icons plus IPFS pinning for NFT publishing.
//!
//! # Archive key format
//!
//! Every backend stores icons under `images/{slug}_{timestamp}.{ext}`, where the
//! slug is derived from the prompt and the timestamp is an RFC 3339 instant with
//! `:` and `.` replaced by `-`. Key generation lives in the `keys` module so all
//! backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
#[cfg(feature = "ipfs")]
pub mod ipfs;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{archive_key, prompt_slug, ARCHIVE_EXTENSION, ARCHIVE_PREFIX};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use uniicon_core::StorageBackend;
#[cfg(feature = "ipfs")]
pub use ipfs::{IpfsError, IpfsResult, PinataClient};
