//! Cart state snapshot.

use rust_decimal::Decimal;
use serde::Serialize;
use shopfront_core::ProductId;

use crate::item::CartLineItem;

/// The sum of line totals does not fit in a [`Decimal`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cart total exceeds the largest representable amount")]
pub struct TotalOverflow;

/// Sum `price × quantity` over `items` without panicking.
pub(crate) fn checked_total<'a>(
    items: impl IntoIterator<Item = &'a CartLineItem>,
) -> Result<Decimal, TotalOverflow> {
    items.into_iter().try_fold(Decimal::ZERO, |sum, item| {
        item.line_total()
            .and_then(|line| sum.checked_add(line))
            .ok_or(TotalOverflow)
    })
}

/// The cart contents plus the derived total.
///
/// Invariants, upheld by every constructor and by [`crate::CartStore`]:
/// - no two items share an `id`
/// - `total == Σ(price × quantity)` over `items`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartState {
    pub(crate) items: Vec<CartLineItem>,
    pub(crate) total: Decimal,
}

impl CartState {
    /// An empty cart with a zero total.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a state from raw line items.
    ///
    /// Lines sharing an id are merged into the first occurrence (quantities
    /// summed, first snapshot kept) and the total is recomputed, so a total
    /// read from storage is never trusted.
    ///
    /// # Errors
    ///
    /// Returns [`TotalOverflow`] if the items cannot be totalled.
    pub fn from_items(
        items: impl IntoIterator<Item = CartLineItem>,
    ) -> Result<Self, TotalOverflow> {
        let mut merged: Vec<CartLineItem> = Vec::new();
        for item in items {
            match merged.iter_mut().find(|existing| existing.id() == item.id()) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => merged.push(item),
            }
        }
        let total = checked_total(&merged)?;
        Ok(Self {
            items: merged,
            total,
        })
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of line totals, independent of the cached `total`.
    ///
    /// # Errors
    ///
    /// Returns [`TotalOverflow`] if the sum does not fit in a [`Decimal`].
    pub fn computed_total(&self) -> Result<Decimal, TotalOverflow> {
        checked_total(&self.items)
    }

    pub(crate) fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}
