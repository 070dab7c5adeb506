//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! shop-cli cart add --id 2 --price 50000 --quantity 2 --category drinks --on-sale
//! shop-cli cart remove --id 2
//! shop-cli cart clear
//! ```

use std::io::{self, Write};

use clap::Args;
use rust_decimal::Decimal;
use shopfront_cart::{CartConfig, CartPersistence, CartStore};
use shopfront_core::{Price, Product, ProductId, Quantity};
use tracing::info;

/// Product snapshot and quantity for `cart add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Product ID
    #[arg(short, long)]
    pub id: ProductId,

    /// Unit price, zero or more
    #[arg(short, long, allow_negative_numbers = true, value_parser = parse_price)]
    pub price: Decimal,

    /// Display name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Units to add
    #[arg(short, long, default_value_t = Quantity::ONE)]
    pub quantity: Quantity,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Category reference
    #[arg(long)]
    pub category: Option<String>,

    /// Mark the product as on sale
    #[arg(long)]
    pub on_sale: bool,

    /// Advertised discount percentage
    #[arg(long)]
    pub discount_percent: Option<Decimal>,
}

/// Parse a unit price, rejecting negative amounts.
fn parse_price(s: &str) -> Result<Decimal, String> {
    let price: Decimal = s.trim().parse().map_err(|e: rust_decimal::Error| e.to_string())?;
    if price < Decimal::ZERO {
        return Err(format!("price cannot be negative (got {price})"));
    }
    Ok(price)
}

impl AddArgs {
    fn product(&self) -> Product {
        Product {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            category: self.category.clone(),
            on_sale: self.on_sale,
            discount_percent: self.discount_percent,
        }
    }
}

/// Print every line, the unit count and the total.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn show(config: &CartConfig, out: &mut impl Write) -> io::Result<()> {
    let store = CartStore::open(config.file_persistence());
    report(config, &store, out)
}

/// Add `args.quantity` units of the described product.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn add(config: &CartConfig, args: &AddArgs, out: &mut impl Write) -> io::Result<()> {
    let mut store = CartStore::open(config.file_persistence());
    store.add_item(&args.product(), args.quantity);
    info!(product_id = %args.id, quantity = %args.quantity, "Added to cart");
    report(config, &store, out)
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn remove(config: &CartConfig, id: ProductId, out: &mut impl Write) -> io::Result<()> {
    let mut store = CartStore::open(config.file_persistence());
    if !store.contains(id) {
        info!(product_id = %id, "Product not in cart");
    }
    store.remove_item(id);
    report(config, &store, out)
}

/// Set a product's quantity; zero or less removes it.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn update(
    config: &CartConfig,
    id: ProductId,
    quantity: i64,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut store = CartStore::open(config.file_persistence());
    store.update_quantity(id, quantity);
    report(config, &store, out)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn clear(config: &CartConfig, out: &mut impl Write) -> io::Result<()> {
    let mut store = CartStore::open(config.file_persistence());
    store.clear_cart();
    info!("Cart cleared");
    report(config, &store, out)
}

fn report<P: CartPersistence>(
    config: &CartConfig,
    store: &CartStore<P>,
    out: &mut impl Write,
) -> io::Result<()> {
    let currency = config.pricing.currency;
    if store.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }
    for item in store.items() {
        let line_total = item
            .line_total()
            .map_or_else(|| "-".to_owned(), |total| Price::new(total, currency).to_string());
        writeln!(
            out,
            "{:>6}  {:<24} {:>4} x {:>12} = {:>12}",
            item.id(),
            item.product.name,
            item.quantity,
            Price::new(item.unit_price(), currency),
            line_total,
        )?;
    }
    writeln!(
        out,
        "{} item(s) in {} line(s), total {}",
        store.item_count(),
        store.line_count(),
        Price::new(store.total(), currency),
    )
}
