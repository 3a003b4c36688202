//! Cart commands.
//!
//! Every command runs inside the provider scope set up by `main` and reaches
//! the store through `use_cart`.

use go_marketplace_cart::{
    Cart, ContextError, LineItemInput, Price, ProductId, SyncStatus, format_amount, use_cart,
};
use tracing::{info, warn};

/// Log every line item, the total quantity and the subtotal.
///
/// # Errors
///
/// Returns `ContextError` if called outside a provider scope.
pub fn list() -> Result<(), ContextError> {
    let cart = use_cart()?.products();

    if cart.is_empty() {
        info!("Cart is empty");
        return Ok(());
    }

    for line in cart.iter() {
        info!(
            "{:>4} x {} ({}) @ {} = {}",
            line.quantity.get(),
            line.title,
            line.id,
            line.price.display(),
            format_amount(line.line_total())
        );
    }
    info!(
        "{} item(s), subtotal {}",
        cart.total_quantity(),
        format_amount(cart.subtotal())
    );

    Ok(())
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns `ContextError` if called outside a provider scope.
pub async fn add(
    id: String,
    title: String,
    image_url: String,
    price: Price,
) -> Result<(), ContextError> {
    let store = use_cart()?;
    let id = ProductId::from(id);

    let status = store
        .add_to_cart(LineItemInput {
            id: id.clone(),
            title,
            image_url,
            price,
        })
        .await;
    report(&status);

    if let Some(line) = store.products().get(&id) {
        info!("{} now has quantity {}", line.id, line.quantity);
    }
    Ok(())
}

/// Raise a product's quantity by one.
///
/// # Errors
///
/// Returns `ContextError` if called outside a provider scope.
pub async fn increment(id: String) -> Result<(), ContextError> {
    let store = use_cart()?;
    let id = ProductId::from(id);

    report(&store.increment(&id).await);
    log_quantity(&store.products(), &id);
    Ok(())
}

/// Lower a product's quantity by one.
///
/// # Errors
///
/// Returns `ContextError` if called outside a provider scope.
pub async fn decrement(id: String) -> Result<(), ContextError> {
    let store = use_cart()?;
    let id = ProductId::from(id);

    report(&store.decrement(&id).await);
    log_quantity(&store.products(), &id);
    Ok(())
}

fn log_quantity(cart: &Cart, id: &ProductId) {
    match cart.get(id) {
        Some(line) => info!("{id} now has quantity {}", line.quantity),
        None => info!("{id} is not in the cart"),
    }
}

/// Storage failures never fail a cart command; they are only reported.
fn report(status: &SyncStatus) {
    if let Some(e) = status.error() {
        warn!("Cart updated in memory but not saved: {e}");
    }
}
