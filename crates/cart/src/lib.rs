//! Shopfront Cart - the shopper's local cart and checkout pricing.
//!
//! # Architecture
//!
//! - [`store::CartStore`] holds the authoritative client-side cart. It is an
//!   ordinary value owned by the composition root; there is no global store.
//! - [`persistence`] adapters snapshot the cart into a single key/value slot
//!   (`cart-storage`). Writes are best-effort: a failed save is logged and
//!   the in-memory cart stays authoritative.
//! - [`pricing`] turns cart lines into a checkout quote (subtotal, discount,
//!   shipping, tax) and an order draft for the external order API.
//! - [`config`] loads pricing policy and storage location from the
//!   environment.
//!
//! All operations are synchronous and run to completion on the caller's
//! thread.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod item;
pub mod persistence;
pub mod pricing;
pub mod state;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use item::CartLineItem;
pub use persistence::{
    CartPersistence, FilePersistence, MemoryPersistence, PersistenceError, STORAGE_KEY,
};
pub use pricing::{CheckoutQuote, Discount, OrderDraft, PricingError, PricingPolicy};
pub use state::{CartState, TotalOverflow};
pub use store::CartStore;
