//! Integration tests for checkout pricing over a live cart.

use rust_decimal::Decimal;
use shopfront_cart::{
    CartConfig, CartStore, CheckoutQuote, Discount, MemoryPersistence, OrderDraft, PricingPolicy,
};
use shopfront_core::{CurrencyCode, ProductId};
use shopfront_integration_tests::{amount, product, qty};

#[test]
fn test_quote_tracks_cart_mutations() {
    let policy = PricingPolicy::default();
    let mut store = CartStore::open(MemoryPersistence::new());

    store.add_item(&product(1, 100_000), qty(1));
    store.add_item(&product(2, 50_000), qty(2));
    let quote = CheckoutQuote::for_cart(store.state(), &policy, None)
        .unwrap_or_else(|e| panic!("quote: {e}"));
    assert_eq!(quote.subtotal, store.total());
    assert_eq!(quote.shipping, amount(30_000));

    store.update_quantity(ProductId::new(1), 4);
    let quote = CheckoutQuote::for_cart(store.state(), &policy, None)
        .unwrap_or_else(|e| panic!("quote: {e}"));
    assert_eq!(quote.subtotal, amount(500_000));
    assert_eq!(quote.shipping, Decimal::ZERO);
    assert_eq!(quote.tax, amount(50_000));
    assert_eq!(quote.grand_total, amount(550_000));
    assert_eq!(quote.item_count, store.item_count());
}

#[test]
fn test_cached_price_is_authoritative() {
    let policy = PricingPolicy::default();
    let mut store = CartStore::open(MemoryPersistence::new());
    store.add_item(&product(1, 100_000), qty(1));

    // Catalog raised the price after the product was added.
    store.add_item(&product(1, 180_000), qty(1));

    let draft = OrderDraft::from_cart(store.state(), &policy, None)
        .unwrap_or_else(|e| panic!("draft: {e}"));
    let line = draft.lines.first().map(|l| (l.unit_price, l.quantity));
    assert_eq!(line, Some((amount(100_000), 2)));
    assert_eq!(draft.quote.subtotal, amount(200_000));
}

#[test]
fn test_coupon_applied_to_draft() {
    let policy = PricingPolicy::default();
    let mut store = CartStore::open(MemoryPersistence::new());
    store.add_item(&product(1, 300_000), qty(2));

    let coupon = Discount::parse("100000").ok();
    let draft = OrderDraft::from_cart(store.state(), &policy, coupon)
        .unwrap_or_else(|e| panic!("draft: {e}"));

    assert_eq!(draft.quote.discount, amount(100_000));
    assert_eq!(draft.quote.shipping, Decimal::ZERO);
    assert_eq!(draft.quote.tax, amount(50_000));
    assert_eq!(draft.quote.grand_total, amount(550_000));

    let json = serde_json::to_value(&draft).unwrap_or_default();
    assert_eq!(json["coupon"]["kind"], "fixed");
    assert_eq!(json["coupon"]["value"], "100000");
}

#[test]
fn test_policy_from_config_lookup() {
    let config = CartConfig::from_lookup(|key| match key {
        "SHOPFRONT_CURRENCY" => Some("USD".to_string()),
        "SHOPFRONT_SHIPPING_FEE" => Some("5".to_string()),
        "SHOPFRONT_FREE_SHIPPING_THRESHOLD" => Some("50".to_string()),
        "SHOPFRONT_TAX_RATE" => Some("0.07".to_string()),
        _ => None,
    })
    .unwrap_or_else(|e| panic!("config: {e}"));
    assert_eq!(config.pricing.currency, CurrencyCode::USD);

    let mut store = CartStore::open(MemoryPersistence::new());
    let mut pen = product(1, 0);
    pen.price = Decimal::new(1_250, 2);
    store.add_item(&pen, qty(3));

    let quote = CheckoutQuote::for_cart(store.state(), &config.pricing, None)
        .unwrap_or_else(|e| panic!("quote: {e}"));

    // 37.50 subtotal, below the 50 threshold; 7% of 37.50 = 2.625
    assert_eq!(quote.shipping, amount(5));
    assert_eq!(quote.tax, Decimal::new(263, 2));
    assert_eq!(quote.grand_total, Decimal::new(4_513, 2));
    assert_eq!(quote.grand_total_price().display(), "$45.13");
}
