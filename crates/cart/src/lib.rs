//! GoMarketplace Cart - Persisted shopping cart store.
//!
//! Holds the customer's line items in memory, mirrors them to a local
//! key-value store after every change, and restores them on startup.
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = CartConfig::from_env()?;
//! let store = CartStore::from_config(&config);
//! store.load().await;
//!
//! store.add_to_cart(item).await;
//! store.increment(&id).await;
//! store.decrement(&id).await;
//!
//! for line in store.products().iter() {
//!     tracing::info!(id = %line.id, quantity = %line.quantity, "line item");
//! }
//! ```
//!
//! # Modules
//!
//! - [`store`] - `CartStore` and its load/mutation results
//! - [`storage`] - `KeyValueStore` port with memory and file adapters
//! - [`context`] - Scoped access via `provide` / `use_cart`
//! - [`config`] - Environment configuration
//! - [`error`] - Error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod context;
pub mod error;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use context::{provide, use_cart};
pub use error::{ContextError, StorageError};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{CartStore, DEFAULT_STORAGE_KEY, LoadOutcome, SyncStatus};

pub use go_marketplace_core::{
    Cart, LineItem, LineItemInput, Price, PriceError, ProductId, Quantity, format_amount,
};
