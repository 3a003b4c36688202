//! GoMarketplace Core - Shared cart types.
//!
//! This crate provides the types used by every GoMarketplace component:
//! - `cart` - The persisted cart store and its storage adapters
//! - `cli` - Command-line tool for inspecting and editing the local cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access. Every cart operation returns a new [`Cart`] value instead
//! of mutating the existing one, so snapshots handed to consumers never
//! change underneath them.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, and quantities
//! - [`cart`] - Line items and the ordered, id-unique cart collection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartError, LineItem, LineItemInput};
pub use types::*;
