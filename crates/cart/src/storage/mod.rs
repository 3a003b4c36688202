//! Durable key-value storage for the cart record.
//!
//! The cart is persisted as a single string value under one key, mirroring
//! the device key-value store the mobile app writes to. Adapters:
//!
//! - [`MemoryStore`] - in-process `HashMap`, for tests and ephemeral carts
//! - [`FileStore`] - one JSON file per key inside a directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StorageError;

/// String-valued key-value store.
///
/// Implementations must be safe to share across tasks. A `set_item` that
/// returns `Ok` must be visible to every later `get_item` on the same store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError>;
}
