//! The cart store.
//!
//! [`CartStore`] owns the cart state and a persistence adapter. Every
//! mutator builds the new line list, recomputes the total, then saves.
//! A change whose total would not fit in a [`Decimal`] is rejected and the
//! cart is left as it was. Saving is best-effort: failures are logged and
//! otherwise ignored.

use rust_decimal::Decimal;
use shopfront_core::{Product, ProductId, Quantity};
use tracing::{debug, instrument, warn};

use crate::item::CartLineItem;
use crate::persistence::CartPersistence;
use crate::state::{CartState, checked_total};

/// The shopper's cart.
#[derive(Debug)]
pub struct CartStore<P> {
    state: CartState,
    persistence: P,
}

impl<P: CartPersistence> CartStore<P> {
    /// Rehydrate a cart from `persistence`.
    ///
    /// Starts empty when nothing is stored or the stored cart cannot be
    /// read.
    #[instrument(skip(persistence))]
    pub fn open(persistence: P) -> Self {
        let state = match persistence.load() {
            Ok(Some(state)) => {
                debug!(
                    lines = state.items().len(),
                    total = %state.total(),
                    "Cart rehydrated"
                );
                state
            }
            Ok(None) => CartState::empty(),
            Err(e) => {
                warn!(error = %e, "Failed to rehydrate cart, starting empty");
                CartState::empty()
            }
        };
        Self { state, persistence }
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already in the cart its quantity is increased and
    /// the cached snapshot (name, price, ...) is left untouched. Otherwise a
    /// new line is appended.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(&mut self, product: &Product, quantity: Quantity) {
        let mut items = self.state.items.clone();
        match items.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => items.push(CartLineItem::new(product, quantity)),
        }
        self.commit(items);
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: &Product) {
        self.add_item(product, Quantity::ONE);
    }

    /// Remove the line for `product_id`. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: ProductId) {
        let items = self
            .state
            .items
            .iter()
            .filter(|item| item.id() != product_id)
            .cloned()
            .collect();
        self.commit(items);
    }

    /// Set the quantity for `product_id`.
    ///
    /// Zero or negative quantities remove the line. Values above `u32::MAX`
    /// are clamped. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let Some(quantity) = Quantity::saturating_from(quantity) else {
            self.remove_item(product_id);
            return;
        };
        let mut items = self.state.items.clone();
        if let Some(item) = items.iter_mut().find(|item| item.id() == product_id) {
            item.quantity = quantity;
        }
        self.commit(items);
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.commit(Vec::new());
    }

    /// Recompute the total from the current lines and return it.
    pub fn calculate_total(&mut self) -> Decimal {
        match self.state.computed_total() {
            Ok(total) => self.state.total = total,
            Err(e) => warn!(error = %e, "Keeping previous cart total"),
        }
        self.state.total
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.state.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.state.items()
    }

    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.state.total()
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.state.get(product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.state.position(product_id).is_some()
    }

    /// Borrow the persistence adapter.
    #[must_use]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Consume the store and return its state.
    #[must_use]
    pub fn into_state(self) -> CartState {
        self.state
    }

    fn commit(&mut self, items: Vec<CartLineItem>) {
        let total = match checked_total(&items) {
            Ok(total) => total,
            Err(e) => {
                warn!(error = %e, "Rejected cart change");
                return;
            }
        };
        self.state = CartState { items, total };
        debug!(
            lines = self.state.items.len(),
            units = self.state.item_count(),
            %total,
            "Cart updated"
        );
        if let Err(e) = self.persistence.save(&self.state) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}
