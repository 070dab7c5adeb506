//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_DATA_DIR` - Directory holding the cart storage file (default: .shopfront)
//! - `SHOPFRONT_CURRENCY` - ISO 4217 store currency (default: VND)
//! - `SHOPFRONT_SHIPPING_FEE` - Flat shipping fee (default: 30000)
//! - `SHOPFRONT_FREE_SHIPPING_THRESHOLD` - Discounted subtotal for free shipping
//!   (default: 500000; set empty to always charge shipping)
//! - `SHOPFRONT_TAX_RATE` - Tax rate as a fraction between 0 and 1 (default: 0.10)

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use shopfront_core::CurrencyCode;
use thiserror::Error;

use crate::persistence::FilePersistence;
use crate::pricing::PricingPolicy;

const DEFAULT_DATA_DIR: &str = ".shopfront";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory holding `cart-storage.json`
    pub data_dir: PathBuf,
    /// Checkout pricing rules
    pub pricing: PricingPolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            pricing: PricingPolicy::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed,
    /// or if an amount or rate is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`CartConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = PricingPolicy::default();

        let data_dir = lookup("SHOPFRONT_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let currency = match lookup("SHOPFRONT_CURRENCY") {
            Some(value) => CurrencyCode::from_str(&value)
                .map_err(|e| ConfigError::InvalidEnvVar("SHOPFRONT_CURRENCY".to_string(), e))?,
            None => defaults.currency,
        };

        let shipping_fee = match lookup("SHOPFRONT_SHIPPING_FEE") {
            Some(value) => parse_amount("SHOPFRONT_SHIPPING_FEE", &value)?,
            None => defaults.shipping_fee,
        };

        let free_shipping_threshold = match lookup("SHOPFRONT_FREE_SHIPPING_THRESHOLD") {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(parse_amount("SHOPFRONT_FREE_SHIPPING_THRESHOLD", &value)?),
            None => defaults.free_shipping_threshold,
        };

        let tax_rate = match lookup("SHOPFRONT_TAX_RATE") {
            Some(value) => parse_rate("SHOPFRONT_TAX_RATE", &value)?,
            None => defaults.tax_rate,
        };

        Ok(Self {
            data_dir,
            pricing: PricingPolicy {
                currency,
                shipping_fee,
                free_shipping_threshold,
                tax_rate,
            },
        })
    }

    /// File persistence rooted at the configured data directory.
    #[must_use]
    pub fn file_persistence(&self) -> FilePersistence {
        FilePersistence::new(&self.data_dir)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a non-negative decimal amount.
fn parse_amount(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    let amount = Decimal::from_str(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if amount < Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must not be negative (got {amount})"),
        ));
    }
    Ok(amount)
}

/// Parse a rate in `[0, 1]`.
fn parse_rate(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    let rate = parse_amount(key, value)?;
    if rate > Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0 and 1 (got {rate})"),
        ));
    }
    Ok(rate)
}
