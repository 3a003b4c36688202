//! Cart line items and the cart collection.
//!
//! A [`Cart`] is an ordered sequence of [`LineItem`]s, unique by product ID.
//! Entries keep the order in which they were first added. All operations are
//! pure: they borrow the current cart and return the next one.
//!
//! # Persisted format
//!
//! A cart serializes as a bare JSON array:
//!
//! ```json
//! [{"id":"a","title":"Shoe","image_url":"https://…","price":19.99,"quantity":2}]
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId, Quantity};

/// Errors raised when building a cart from raw line items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Two line items share a product ID.
    #[error("duplicate line item for product {0}")]
    DuplicateLineItem(ProductId),
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Price,
    pub quantity: Quantity,
}

impl LineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .amount()
            .saturating_mul(Decimal::from(self.quantity.get()))
    }
}

/// Product details supplied when adding to the cart.
///
/// Same shape as [`LineItem`] without the quantity, which the cart owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Price,
}

impl From<LineItemInput> for LineItem {
    fn from(input: LineItemInput) -> Self {
        Self {
            id: input.id,
            title: input.title,
            image_url: input.image_url,
            price: input.price,
            quantity: Quantity::ONE,
        }
    }
}

/// Ordered, id-unique collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from line items in order.
    ///
    /// # Errors
    ///
    /// Returns `CartError::DuplicateLineItem` if two items share an ID.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CartError::DuplicateLineItem(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over line items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Look up the line item for a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Whether the cart holds a line item for this product.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all line items (the cart badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Add a product.
    ///
    /// If the product is already in the cart this is the same as
    /// [`Cart::with_incremented`]; otherwise a new line item with quantity 1
    /// is appended after all existing entries.
    #[must_use]
    pub fn with_added(&self, input: LineItemInput) -> Self {
        if self.contains(&input.id) {
            return self.with_incremented(&input.id);
        }

        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(LineItem::from(input));
        Self { items }
    }

    /// Raise the quantity of a product by one. Unknown IDs leave the cart
    /// unchanged.
    #[must_use]
    pub fn with_incremented(&self, id: &ProductId) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == *id {
                    LineItem {
                        quantity: item.quantity.increment(),
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Self { items }
    }

    /// Lower the quantity of a product by one, removing the line item when
    /// its last unit goes. Unknown IDs leave the cart unchanged.
    #[must_use]
    pub fn with_decremented(&self, id: &ProductId) -> Self {
        let items = self
            .items
            .iter()
            .filter_map(|item| {
                if item.id == *id {
                    item.quantity.decrement().map(|quantity| LineItem {
                        quantity,
                        ..item.clone()
                    })
                } else {
                    Some(item.clone())
                }
            })
            .collect();
        Self { items }
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    /// Product ids used by generated operations. The last one is never added.
    const IDS: [&str; 5] = ["a", "b", "c", "d", "never-added"];

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, Price),
        Increment(usize),
        Decrement(usize),
    }

    fn price() -> impl Strategy<Value = Price> {
        prop_oneof![
            any::<i32>().prop_map(Price::from_cents),
            (-(1_i64 << 40)..(1_i64 << 40), 0_u32..=12).prop_filter_map(
                "amount must survive a JSON number",
                |(mantissa, scale)| Price::new(Decimal::new(mantissa, scale)).ok()
            ),
        ]
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..IDS.len() - 1, price()).prop_map(|(idx, price)| Op::Add(idx, price)),
            (0..IDS.len()).prop_map(Op::Increment),
            (0..IDS.len()).prop_map(Op::Decrement),
        ]
    }

    fn input(idx: usize, price: Price) -> LineItemInput {
        LineItemInput {
            id: ProductId::from(IDS[idx]),
            title: format!("Product {}", IDS[idx]),
            image_url: format!("https://cdn.example.com/{}.png", IDS[idx]),
            price,
        }
    }

    fn apply(cart: &Cart, op: &Op) -> Cart {
        match op {
            Op::Add(idx, price) => cart.with_added(input(*idx, *price)),
            Op::Increment(idx) => cart.with_incremented(&ProductId::from(IDS[*idx])),
            Op::Decrement(idx) => cart.with_decremented(&ProductId::from(IDS[*idx])),
        }
    }

    proptest! {
        #[test]
        fn test_any_sequence_keeps_ids_unique_and_quantities_positive(
            ops in prop::collection::vec(op(), 0..64)
        ) {
            let mut cart = Cart::new();
            for op in &ops {
                cart = apply(&cart, op);
                let ids: HashSet<_> = cart.iter().map(|item| item.id.as_str()).collect();
                prop_assert_eq!(ids.len(), cart.len());
                prop_assert!(cart.iter().all(|item| item.quantity.get() >= 1));
            }
        }

        #[test]
        fn test_unknown_id_never_changes_cart(ops in prop::collection::vec(op(), 0..64)) {
            let cart = ops.iter().fold(Cart::new(), |cart, op| apply(&cart, op));
            let missing = IDS.len() - 1;
            prop_assert_eq!(&apply(&cart, &Op::Increment(missing)), &cart);
            prop_assert_eq!(&apply(&cart, &Op::Decrement(missing)), &cart);
        }

        #[test]
        fn test_json_roundtrip_restores_any_cart(ops in prop::collection::vec(op(), 0..64)) {
            let cart = ops.iter().fold(Cart::new(), |cart, op| apply(&cart, op));
            let json = serde_json::to_string(&cart).unwrap();
            let restored: Cart = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(restored, cart);
        }
    }
}
