//! Shopfront CLI - Local cart and checkout tools.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of product 1 at 100000
//! shop-cli cart add --id 1 --name "Green tea" --price 100000 --quantity 2
//!
//! # Set product 1 to four units (0 or less removes it)
//! shop-cli cart update --id 1 --quantity 4
//!
//! # Show the cart
//! shop-cli cart show
//!
//! # Print the order draft with a 10% coupon
//! shop-cli checkout --coupon 10%
//! ```
//!
//! # Commands
//!
//! - `cart` - Inspect and modify the file-backed cart
//! - `checkout` - Price the cart and print the order draft as JSON
//!
//! Configuration is read from `SHOPFRONT_*` environment variables (see
//! `shopfront_cart::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shopfront_cart::{CartConfig, Discount};
use shopfront_core::ProductId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Shopfront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and modify the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Price the cart and print the order draft
    Checkout {
        /// Coupon: a percentage (`10%`) or a fixed amount (`50000`)
        #[arg(short, long)]
        coupon: Option<Discount>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines, unit count and total
    Show,
    /// Add a product to the cart
    Add(commands::cart::AddArgs),
    /// Remove a product from the cart
    Remove {
        /// Product ID
        #[arg(short, long)]
        id: ProductId,
    },
    /// Set a product's quantity (0 or less removes it)
    Update {
        /// Product ID
        #[arg(short, long)]
        id: ProductId,

        /// New quantity
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_cart=info,shopfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config, &mut out)?,
            CartAction::Add(args) => commands::cart::add(&config, &args, &mut out)?,
            CartAction::Remove { id } => commands::cart::remove(&config, id, &mut out)?,
            CartAction::Update { id, quantity } => {
                commands::cart::update(&config, id, quantity, &mut out)?;
            }
            CartAction::Clear => commands::cart::clear(&config, &mut out)?,
        },
        Commands::Checkout { coupon } => commands::checkout::draft(&config, coupon, &mut out)?,
    }
    Ok(())
}
