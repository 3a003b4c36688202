//! The cart store shared with the rest of the application.
//!
//! `CartStore` owns the current [`Cart`] and mirrors it to a
//! [`KeyValueStore`] after every mutation. It is constructed once at startup,
//! loaded from storage, and handed to consumers by clone (or through
//! [`crate::provide`]).
//!
//! # Storage policy
//!
//! Storage never blocks the cart. A record that cannot be read leaves the
//! cart empty, and a write that fails leaves the in-memory cart as the source
//! of truth. Both cases are logged and returned as data so callers can
//! inspect them if they care.

use std::fmt;
use std::sync::Arc;

use go_marketplace_core::{Cart, LineItem, LineItemInput, ProductId};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::config::CartConfig;
use crate::error::StorageError;
use crate::storage::{FileStore, KeyValueStore};

/// Key the cart record is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:products";

/// Result of writing the cart after a mutation.
#[derive(Debug)]
pub enum SyncStatus {
    /// The full cart was written to storage.
    Persisted,
    /// The write failed. The in-memory cart still reflects the mutation.
    NotPersisted(StorageError),
}

impl SyncStatus {
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }

    /// The write error, if the write failed.
    #[must_use]
    pub const fn error(&self) -> Option<&StorageError> {
        match self {
            Self::Persisted => None,
            Self::NotPersisted(e) => Some(e),
        }
    }

    /// Convert to a `Result` for callers that want `?` semantics.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write failed.
    pub fn into_result(self) -> Result<(), StorageError> {
        match self {
            Self::Persisted => Ok(()),
            Self::NotPersisted(e) => Err(e),
        }
    }
}

/// Result of restoring the cart at startup.
#[derive(Debug)]
pub enum LoadOutcome {
    /// A record was found and this many line items were restored.
    Restored(usize),
    /// No record exists yet.
    Empty,
    /// A record could not be read or parsed and was ignored.
    Discarded(StorageError),
}

/// Handle to the application's cart.
///
/// Cloning is cheap; every clone shares the same cart and storage.
/// Mutations from any clone are serialized, each one applied and written
/// before the next starts.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    state: watch::Sender<Arc<Cart>>,
    /// Held across compute-and-persist so writes land in mutation order.
    write_lock: Mutex<()>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("products", &self.inner.state.borrow().len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create an empty cart backed by `storage` under `key`.
    ///
    /// Call [`CartStore::load`] to restore a previously persisted cart.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(Arc::new(Cart::new()));

        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                key: key.into(),
                state,
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Create an empty cart stored under [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn with_default_key(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::new(storage, DEFAULT_STORAGE_KEY)
    }

    /// Create an empty cart backed by a [`FileStore`] in the configured
    /// directory.
    #[must_use]
    pub fn from_config(config: &CartConfig) -> Self {
        let storage = Arc::new(FileStore::new(&config.storage_dir));
        Self::new(storage, config.storage_key.clone())
    }

    /// Key the cart record is stored under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.inner.key
    }

    /// Snapshot of the current cart.
    ///
    /// The snapshot is immutable; later mutations produce a new cart and do
    /// not affect snapshots already handed out.
    #[must_use]
    pub fn products(&self) -> Arc<Cart> {
        Arc::clone(&self.inner.state.borrow())
    }

    /// Subscribe to cart changes. The receiver sees every new snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.inner.state.subscribe()
    }

    /// Restore the cart from storage.
    ///
    /// A missing, unreadable, or malformed record leaves the cart as it was.
    /// Within a readable record, line items that cannot be parsed (a zero
    /// quantity, a price out of range) are dropped and the rest restored.
    #[instrument(skip(self), fields(key = %self.inner.key))]
    pub async fn load(&self) -> LoadOutcome {
        let _guard = self.inner.write_lock.lock().await;

        match self.read_record().await {
            Ok(Some(cart)) => {
                let count = cart.len();
                self.inner.state.send_replace(Arc::new(cart));
                info!(products = count, "Restored cart");
                LoadOutcome::Restored(count)
            }
            Ok(None) => {
                debug!("No persisted cart");
                LoadOutcome::Empty
            }
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable cart record");
                LoadOutcome::Discarded(e)
            }
        }
    }

    /// Add a product, or bump its quantity if it is already in the cart.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub async fn add_to_cart(&self, item: LineItemInput) -> SyncStatus {
        self.apply(|cart| {
            if cart.contains(&item.id) {
                debug!("Product already in cart, incrementing");
            }
            cart.with_added(item)
        })
        .await
    }

    /// Raise a product's quantity by one. Unknown IDs leave the cart
    /// unchanged, but the cart is still written.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn increment(&self, id: &ProductId) -> SyncStatus {
        self.apply(|cart| cart.with_incremented(id)).await
    }

    /// Lower a product's quantity by one, removing it at zero. Unknown IDs
    /// leave the cart unchanged, but the cart is still written.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn decrement(&self, id: &ProductId) -> SyncStatus {
        self.apply(|cart| cart.with_decremented(id)).await
    }

    async fn apply(&self, transform: impl FnOnce(&Cart) -> Cart) -> SyncStatus {
        let _guard = self.inner.write_lock.lock().await;

        let next = Arc::new(transform(&self.products()));
        self.inner.state.send_replace(Arc::clone(&next));
        self.persist(&next).await
    }

    async fn persist(&self, cart: &Cart) -> SyncStatus {
        let result: Result<(), StorageError> = async {
            let json = serde_json::to_string(cart)?;
            self.inner.storage.set_item(&self.inner.key, json).await
        }
        .await;

        match result {
            Ok(()) => {
                debug!(products = cart.len(), "Persisted cart");
                SyncStatus::Persisted
            }
            Err(e) => {
                warn!(error = %e, "Failed to persist cart");
                SyncStatus::NotPersisted(e)
            }
        }
    }

    async fn read_record(&self) -> Result<Option<Cart>, StorageError> {
        let Some(raw) = self.inner.storage.get_item(&self.inner.key).await? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }

        let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
        let mut items = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<LineItem>(entry) {
                Ok(item) => items.push(item),
                Err(e) => warn!(index, error = %e, "Dropping unreadable line item"),
            }
        }

        Ok(Some(Cart::from_items(items)?))
    }
}
