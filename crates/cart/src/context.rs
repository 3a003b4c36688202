//! Scoped access to the application's cart.
//!
//! Consumers deep in a call tree can reach the cart without threading a
//! handle through every function: the application installs its store with
//! [`provide`] and code running inside that scope calls [`use_cart`].
//! Calling `use_cart` anywhere else fails immediately instead of returning an
//! empty cart.
//!
//! ```rust,ignore
//! let store = CartStore::from_config(&config);
//! store.load().await;
//! provide(store, async {
//!     let cart = use_cart()?;
//!     cart.add_to_cart(item).await;
//!     Ok::<_, ContextError>(())
//! })
//! .await?;
//! ```

use std::future::Future;

use crate::error::ContextError;
use crate::store::CartStore;

tokio::task_local! {
    static CURRENT_CART: CartStore;
}

/// Run `f` with `store` installed as the current cart.
///
/// The scope covers `f` only; tasks spawned from inside it do not inherit
/// the cart and must be given a clone of the store.
pub async fn provide<F>(store: CartStore, f: F) -> F::Output
where
    F: Future,
{
    CURRENT_CART.scope(store, f).await
}

/// The cart installed by the enclosing [`provide`] scope.
///
/// # Errors
///
/// Returns `ContextError::MissingProvider` when called outside a provider
/// scope.
pub fn use_cart() -> Result<CartStore, ContextError> {
    CURRENT_CART
        .try_with(CartStore::clone)
        .map_err(|_| ContextError::MissingProvider)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use go_marketplace_core::{LineItemInput, Price, ProductId};

    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> CartStore {
        CartStore::with_default_key(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_use_cart_outside_scope_fails() {
        assert_eq!(use_cart().unwrap_err(), ContextError::MissingProvider);
    }

    #[tokio::test]
    async fn test_use_cart_outside_scope_fails_in_async_context() {
        assert!(matches!(use_cart(), Err(ContextError::MissingProvider)));
    }

    #[tokio::test]
    async fn test_use_cart_returns_provided_store() {
        let store = store();

        provide(store.clone(), async {
            let cart = use_cart().unwrap();
            cart.add_to_cart(LineItemInput {
                id: ProductId::from("a"),
                title: "A".to_string(),
                image_url: String::new(),
                price: Price::from_cents(100),
            })
            .await;
        })
        .await;

        assert_eq!(store.products().len(), 1);
    }

    #[tokio::test]
    async fn test_scope_ends_with_future() {
        provide(store(), async {
            assert!(use_cart().is_ok());
        })
        .await;

        assert!(use_cart().is_err());
    }

    #[tokio::test]
    async fn test_spawned_task_does_not_inherit_scope() {
        provide(store(), async {
            let inner = tokio::spawn(async { use_cart().is_err() }).await.unwrap();
            assert!(inner);
        })
        .await;
    }
}
