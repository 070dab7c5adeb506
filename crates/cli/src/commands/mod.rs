//! CLI subcommand implementations.
//!
//! Each command opens the file-backed cart from [`shopfront_cart::CartConfig`],
//! runs one operation and writes a human-readable (or JSON) report to `out`.

pub mod cart;
pub mod checkout;
