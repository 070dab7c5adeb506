//! Cart line quantity type.

use core::fmt;
use core::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    NotPositive(i64),
    /// The value does not fit in a `u32`.
    #[error("quantity must be at most {max} (got {got})")]
    TooLarge {
        /// Maximum allowed quantity.
        max: u32,
        /// The rejected value.
        got: i64,
    },
    /// The input is not an integer.
    #[error("quantity must be a whole number: {0}")]
    NotANumber(String),
}

/// A strictly positive unit count for a cart line.
///
/// ## Constraints
///
/// - At least 1; a line with no units does not exist in the cart
/// - At most `u32::MAX`
///
/// ## Examples
///
/// ```
/// use shopfront_core::Quantity;
///
/// assert_eq!(Quantity::new(3).unwrap().get(), 3);
///
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::new(-5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Parse a `Quantity` from a signed integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or above `u32::MAX`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value <= 0 {
            return Err(QuantityError::NotPositive(value));
        }
        let units = u32::try_from(value).map_err(|_| QuantityError::TooLarge {
            max: u32::MAX,
            got: value,
        })?;
        NonZeroU32::new(units)
            .map(Self)
            .ok_or(QuantityError::NotPositive(value))
    }

    /// Like [`Quantity::new`] but clamps values above `u32::MAX` instead of
    /// rejecting them. Returns `None` for zero or negative input.
    #[must_use]
    pub fn saturating_from(value: i64) -> Option<Self> {
        if value <= 0 {
            return None;
        }
        let units = u32::try_from(value).unwrap_or(u32::MAX);
        NonZeroU32::new(units).map(Self)
    }

    /// Returns the unit count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Adds two quantities, clamping at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0.get()))
    }

    /// The quantity as a decimal multiplier for price arithmetic.
    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.get())
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| QuantityError::NotANumber(s.to_owned()))?;
        Self::new(value)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}
