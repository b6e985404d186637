//! # Client-side Storage
//!
//! A small string key/value contract. The session credential and the order
//! draft both live here.
//!
//! - [`MemoryStore`] keeps values for the lifetime of the process.
//! - [`FileStore`] keeps one JSON file per key under a state directory, so the
//!   draft survives restarts of the console.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage key of the persisted order draft.
pub const CART_KEY: &str = "cart";

/// Storage key of the session credential.
pub const CREDENTIAL_KEY: &str = "access_token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// String key/value storage.
///
/// Calls are synchronous and complete before returning, so a caller that
/// writes and then replies never replies ahead of its write.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
