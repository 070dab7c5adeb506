//! Checkout price computation.
//!
//! A [`CheckoutQuote`] is derived from the cart lines:
//!
//! ```text
//! subtotal    = Σ unit_price × quantity
//! discount    = min(subtotal, coupon)            rounded to minor units
//! shipping    = 0 if empty or subtotal - discount >= threshold, else fee
//! tax         = (subtotal - discount) × tax_rate rounded to minor units
//! grand_total = subtotal - discount + shipping + tax
//! ```
//!
//! Shipping is not taxed. Cached line prices are authoritative; nothing here
//! consults the catalog.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use shopfront_core::{CurrencyCode, Price, ProductId};
use thiserror::Error;

use crate::item::CartLineItem;
use crate::state::{CartState, TotalOverflow, checked_total};

/// Errors raised while building a quote.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),

    #[error("Discount percentage must be between 0 and 100 (got {0})")]
    PercentOutOfRange(Decimal),

    #[error("Amount cannot be negative (got {0})")]
    NegativeAmount(Decimal),

    #[error(transparent)]
    Overflow(#[from] TotalOverflow),
}

/// Store-wide pricing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Currency used for rounding and display.
    pub currency: CurrencyCode,
    /// Flat shipping fee charged below the free-shipping threshold.
    pub shipping_fee: Decimal,
    /// Discounted subtotal at or above which shipping is free. `None` means
    /// shipping is always charged.
    pub free_shipping_threshold: Option<Decimal>,
    /// Tax rate as a fraction (0.10 = 10 %).
    pub tax_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::VND,
            shipping_fee: Decimal::new(30_000, 0),
            free_shipping_threshold: Some(Decimal::new(500_000, 0)),
            tax_rate: Decimal::new(10, 2),
        }
    }
}

/// A coupon applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage off the subtotal, 0–100.
    Percent(Decimal),
    /// Fixed amount off the subtotal.
    Fixed(Decimal),
}

impl Discount {
    /// Parse `"10%"` as a percentage or `"50000"` as a fixed amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a number, the percentage is
    /// outside 0–100, or the amount is negative.
    pub fn parse(s: &str) -> Result<Self, PricingError> {
        let s = s.trim();
        if let Some(percent) = s.strip_suffix('%') {
            let value = Decimal::from_str(percent.trim())
                .map_err(|_| PricingError::InvalidDiscount(s.to_owned()))?;
            Self::percent(value)
        } else {
            let value =
                Decimal::from_str(s).map_err(|_| PricingError::InvalidDiscount(s.to_owned()))?;
            Self::fixed(value)
        }
    }

    /// A percentage discount.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::PercentOutOfRange`] outside 0–100.
    pub fn percent(value: Decimal) -> Result<Self, PricingError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(PricingError::PercentOutOfRange(value));
        }
        Ok(Self::Percent(value))
    }

    /// A fixed-amount discount.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NegativeAmount`] for negative amounts.
    pub fn fixed(value: Decimal) -> Result<Self, PricingError> {
        if value < Decimal::ZERO {
            return Err(PricingError::NegativeAmount(value));
        }
        Ok(Self::Fixed(value))
    }

    /// Amount taken off `subtotal`, never more than `subtotal`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the amount is not representable.
    pub fn amount_off(
        &self,
        subtotal: Decimal,
        currency: CurrencyCode,
    ) -> Result<Decimal, PricingError> {
        let raw = match self {
            Self::Percent(percent) => subtotal
                .checked_mul(*percent / Decimal::ONE_HUNDRED)
                .ok_or(TotalOverflow)?,
            Self::Fixed(amount) => *amount,
        };
        Ok(currency.round(raw.min(subtotal)))
    }
}

impl FromStr for Discount {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Price breakdown shown at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutQuote {
    pub currency: CurrencyCode,
    pub item_count: u64,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub grand_total: Decimal,
}

impl CheckoutQuote {
    /// Price `items` under `policy`, applying `discount` if given.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if any amount in the breakdown
    /// does not fit in a [`Decimal`].
    pub fn compute(
        items: &[CartLineItem],
        policy: &PricingPolicy,
        discount: Option<&Discount>,
    ) -> Result<Self, PricingError> {
        let currency = policy.currency;
        let subtotal = checked_total(items)?;
        let item_count: u64 = items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum();

        let discount = match discount {
            Some(d) => d.amount_off(subtotal, currency)?,
            None => Decimal::ZERO,
        };
        let taxable = subtotal.checked_sub(discount).ok_or(TotalOverflow)?;

        let free_shipping = policy
            .free_shipping_threshold
            .is_some_and(|threshold| taxable >= threshold);
        let shipping = if items.is_empty() || free_shipping {
            Decimal::ZERO
        } else {
            policy.shipping_fee
        };

        let tax = currency.round(taxable.checked_mul(policy.tax_rate).ok_or(TotalOverflow)?);
        let grand_total = taxable
            .checked_add(shipping)
            .and_then(|total| total.checked_add(tax))
            .ok_or(TotalOverflow)?;

        Ok(Self {
            currency,
            item_count,
            subtotal,
            discount,
            shipping,
            tax,
            grand_total,
        })
    }

    /// Quote for a whole cart.
    ///
    /// # Errors
    ///
    /// See [`CheckoutQuote::compute`].
    pub fn for_cart(
        state: &CartState,
        policy: &PricingPolicy,
        discount: Option<&Discount>,
    ) -> Result<Self, PricingError> {
        Self::compute(state.items(), policy, discount)
    }

    #[must_use]
    pub const fn grand_total_price(&self) -> Price {
        Price::new(self.grand_total, self.currency)
    }
}

/// One line of an order draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl TryFrom<&CartLineItem> for OrderLine {
    type Error = PricingError;

    fn try_from(item: &CartLineItem) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: item.id(),
            name: item.product.name.clone(),
            quantity: item.quantity.get(),
            unit_price: item.unit_price(),
            line_total: item.line_total().ok_or(TotalOverflow)?,
        })
    }
}

/// The payload a checkout flow sends to the order API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDraft {
    pub lines: Vec<OrderLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Discount>,
    pub quote: CheckoutQuote,
}

impl OrderDraft {
    /// Build a draft from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the cart cannot be priced.
    pub fn from_cart(
        state: &CartState,
        policy: &PricingPolicy,
        coupon: Option<Discount>,
    ) -> Result<Self, PricingError> {
        let lines = state
            .items()
            .iter()
            .map(OrderLine::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            lines,
            quote: CheckoutQuote::for_cart(state, policy, coupon.as_ref())?,
            coupon,
        })
    }
}
