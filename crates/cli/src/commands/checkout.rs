//! Checkout command: price the cart and print the order draft.

use std::io::Write;

use shopfront_cart::{CartConfig, CartStore, Discount, OrderDraft};
use tracing::info;

/// Write the order draft for the current cart as pretty JSON.
///
/// The cart itself is left unchanged; placing the order is the order API's
/// job.
///
/// # Errors
///
/// Returns an error if the cart cannot be priced, or if serialization or
/// writing to `out` fails.
pub fn draft(
    config: &CartConfig,
    coupon: Option<Discount>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = CartStore::open(config.file_persistence());
    let draft = OrderDraft::from_cart(store.state(), &config.pricing, coupon)?;

    info!(
        lines = draft.lines.len(),
        grand_total = %draft.quote.grand_total_price(),
        "Order draft prepared"
    );

    serde_json::to_writer_pretty(&mut *out, &draft)?;
    writeln!(out)?;
    Ok(())
}
