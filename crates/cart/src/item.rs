//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{Product, ProductId, Quantity};

/// One product entry in the cart with its own quantity.
///
/// The product fields are a snapshot taken when the line was first added.
/// They are not refreshed when the catalog changes, so the cached `price`
/// stays authoritative for the cart total and for checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Snapshot `product` into a new line.
    #[must_use]
    pub fn new(product: &Product, quantity: Quantity) -> Self {
        Self {
            product: product.clone(),
            quantity,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.product.price
    }

    /// `unit_price × quantity`, or `None` if the product does not fit in a
    /// [`Decimal`].
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.product.price.checked_mul(self.quantity.as_decimal())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let product = Product::new(ProductId::new(1), "Mug", Decimal::new(1_999, 2));
        let line = CartLineItem::new(&product, Quantity::new(3).unwrap());
        assert_eq!(line.line_total(), Some(Decimal::new(5_997, 2)));
    }

    #[test]
    fn test_line_total_overflow_is_none() {
        let product = Product::new(ProductId::new(1), "Yacht", Decimal::MAX);
        let line = CartLineItem::new(&product, Quantity::new(2).unwrap());
        assert_eq!(line.line_total(), None);
    }

    #[test]
    fn test_serialized_shape_is_flat() {
        let product = Product::new(ProductId::new(9), "Tea", Decimal::new(50_000, 0));
        let line = CartLineItem::new(&product, Quantity::new(2).unwrap());
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["name"], "Tea");
    }
}
