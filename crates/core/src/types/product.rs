//! Catalog product snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A product as returned by the catalog client.
///
/// The cart only relies on `id` and `price`; the remaining fields are carried
/// along so that cart views can render without another catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Image URL or asset reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Category reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Whether the catalog flags the product as on sale.
    #[serde(default)]
    pub on_sale: bool,
    /// Advertised discount percentage, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Decimal>,
}

impl Product {
    /// Create a product with only the fields the cart requires.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: None,
            category: None,
            on_sale: false,
            discount_percent: None,
        }
    }
}
