//! Integration tests for the cart store.
//!
//! These tests drive `CartStore` through its public API with the memory and
//! file adapters and check the cart invariants after each step.

use rust_decimal::Decimal;
use shopfront_cart::{
    CartPersistence, CartState, CartStore, FilePersistence, MemoryPersistence, PersistenceError,
};
use shopfront_core::ProductId;
use shopfront_integration_tests::{amount, product, qty};

fn assert_consistent<P: CartPersistence>(store: &CartStore<P>) {
    let expected = store
        .items()
        .iter()
        .try_fold(Decimal::ZERO, |sum, i| sum.checked_add(i.line_total()?));
    assert_eq!(Some(store.total()), expected);

    let mut ids: Vec<ProductId> = store.items().iter().map(|i| i.id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), store.line_count(), "duplicate line ids");
}

// =============================================================================
// Walkthrough
// =============================================================================

#[test]
fn test_shopping_session_walkthrough() {
    let mut store = CartStore::open(MemoryPersistence::new());
    assert!(store.is_empty());

    store.add_item(&product(1, 100_000), qty(1));
    assert_eq!(store.total(), amount(100_000));

    store.add_item(&product(2, 50_000), qty(2));
    assert_eq!(store.total(), amount(200_000));
    assert_eq!(store.item_count(), 3);

    store.update_quantity(ProductId::new(1), 4);
    assert_eq!(store.total(), amount(500_000));

    store.remove_item(ProductId::new(2));
    assert_eq!(store.total(), amount(400_000));
    assert_eq!(store.line_count(), 1);

    store.clear_cart();
    assert!(store.items().is_empty());
    assert_eq!(store.total(), Decimal::ZERO);
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_total_consistent_after_mixed_mutations() {
    let mut store = CartStore::open(MemoryPersistence::new());
    let catalog = [
        product(1, 19_990),
        product(2, 5),
        product(3, 1_250_000),
        product(4, 333),
    ];

    for round in 0_i64..12 {
        let index = usize::try_from(round).unwrap_or(0) % catalog.len();
        let Some(p) = catalog.get(index) else {
            continue;
        };
        match round % 4 {
            0 | 1 => store.add_item(p, qty(round + 1)),
            2 => store.update_quantity(p.id, round - 6),
            _ => store.remove_item(ProductId::new(i32::try_from(round % 5).unwrap_or(0))),
        }
        assert_consistent(&store);
    }
}

#[test]
fn test_fractional_prices_sum_exactly() {
    let mut store = CartStore::open(MemoryPersistence::new());
    let mut cheap = product(1, 0);
    cheap.price = Decimal::new(1, 1); // 0.1
    let mut other = product(2, 0);
    other.price = Decimal::new(2, 1); // 0.2

    store.add_item(&cheap, qty(1));
    store.add_item(&other, qty(1));

    assert_eq!(store.total(), Decimal::new(3, 1));
}

#[test]
fn test_merge_on_duplicate_add() {
    let mut store = CartStore::open(MemoryPersistence::new());
    let p = product(7, 1_000);

    store.add_item(&p, qty(2));
    let lines_after_first = store.line_count();
    store.add_item(&p, qty(3));

    assert_eq!(store.line_count(), lines_after_first);
    assert_eq!(store.get(ProductId::new(7)).map(|i| i.quantity.get()), Some(5));
}

#[test]
fn test_item_count_vs_line_count() {
    let mut store = CartStore::open(MemoryPersistence::new());
    store.add_item(&product(1, 10), qty(2));
    store.add_item(&product(2, 10), qty(3));

    assert_eq!(store.item_count(), 5);
    assert_eq!(store.line_count(), 2);
}

#[test]
fn test_non_positive_update_equals_remove() {
    for quantity in [0, -5] {
        let mut updated = CartStore::open(MemoryPersistence::new());
        let mut removed = CartStore::open(MemoryPersistence::new());
        for store in [&mut updated, &mut removed] {
            store.add_item(&product(1, 10), qty(1));
            store.add_item(&product(2, 20), qty(2));
        }

        updated.update_quantity(ProductId::new(1), quantity);
        removed.remove_item(ProductId::new(1));

        assert_eq!(updated.state(), removed.state());
    }
}

#[test]
fn test_unknown_ids_are_noops() {
    let mut store = CartStore::open(MemoryPersistence::new());
    store.add_item(&product(1, 10), qty(2));
    let before = store.state().clone();

    store.remove_item(ProductId::new(42));
    store.update_quantity(ProductId::new(42), 9);

    assert_eq!(store.state(), &before);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_round_trip_through_memory_storage() {
    let storage = MemoryPersistence::new();
    let mut store = CartStore::open(storage.clone());
    let mut mug = product(3, 120_000);
    mug.image = Some("/img/mug.png".to_string());
    mug.category = Some("kitchen".to_string());
    mug.on_sale = true;
    mug.discount_percent = Some(Decimal::new(15, 0));
    store.add_item(&product(1, 100_000), qty(2));
    store.add_item(&mug, qty(1));

    let rehydrated = CartStore::open(storage);

    assert_eq!(rehydrated.items(), store.items());
    assert_eq!(rehydrated.total(), store.total());
}

#[test]
fn test_round_trip_through_file_storage() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let mut store = CartStore::open(FilePersistence::new(dir.path()));
    store.add_item(&product(1, 100_000), qty(1));
    store.add_item(&product(2, 50_000), qty(2));
    store.update_quantity(ProductId::new(1), 4);

    let rehydrated = CartStore::open(FilePersistence::new(dir.path()));

    assert_eq!(rehydrated.state(), store.state());
    assert_eq!(rehydrated.total(), amount(500_000));
}

#[test]
fn test_clear_is_persisted() {
    let storage = MemoryPersistence::new();
    let mut store = CartStore::open(storage.clone());
    store.add_item(&product(1, 10), qty(1));
    store.clear_cart();

    assert_eq!(storage.load().ok().flatten(), Some(CartState::empty()));
}

#[test]
fn test_mismatched_storage_starts_empty() {
    let storage = MemoryPersistence::new();
    storage
        .set_raw(r#"{"state":{"items":"nope"},"version":0}"#)
        .unwrap_or_else(|e| panic!("set_raw: {e}"));

    let store = CartStore::open(storage);

    assert!(store.is_empty());
    assert_eq!(store.total(), Decimal::ZERO);
}

#[test]
fn test_unrepresentable_stored_total_starts_empty() {
    let storage = MemoryPersistence::new();
    storage
        .set_raw(
            r#"{"state":{"items":[{"id":1,"name":"Yacht","price":"79228162514264337593543950335","quantity":2}]},"version":0}"#,
        )
        .unwrap_or_else(|e| panic!("set_raw: {e}"));

    let mut store = CartStore::open(storage.clone());
    assert!(store.is_empty());

    // The store stays usable and overwrites the bad slot on the next change.
    store.add_item(&product(1, 10), qty(1));
    let reopened = CartStore::open(storage);
    assert_eq!(reopened.total(), amount(10));
}

#[test]
fn test_add_beyond_representable_total_is_rejected() {
    let storage = MemoryPersistence::new();
    let mut store = CartStore::open(storage.clone());
    store.add_item(&product(1, 100_000), qty(1));
    let before = store.state().clone();

    let mut huge = product(2, 0);
    huge.price = Decimal::from_i128_with_scale(10_i128.pow(20), 0);
    store.add_item(&huge, qty(i64::from(u32::MAX)));

    assert_eq!(store.state(), &before);
    assert_consistent(&store);
    assert_eq!(CartStore::open(storage).state(), &before);
}

#[test]
fn test_last_writer_wins() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let mut first = CartStore::open(FilePersistence::new(dir.path()));
    let mut second = CartStore::open(FilePersistence::new(dir.path()));

    first.add_item(&product(1, 10), qty(1));
    second.add_item(&product(2, 20), qty(1));

    let reopened = CartStore::open(FilePersistence::new(dir.path()));
    assert_eq!(reopened.state(), second.state());
}

/// Always fails to save.
struct ReadOnlyStorage;

impl CartPersistence for ReadOnlyStorage {
    fn load(&self) -> Result<Option<CartState>, PersistenceError> {
        Ok(None)
    }

    fn save(&self, _state: &CartState) -> Result<(), PersistenceError> {
        Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied).into())
    }
}

#[test]
fn test_save_failures_leave_memory_authoritative() {
    let mut store = CartStore::open(ReadOnlyStorage);

    store.add_item(&product(1, 100_000), qty(1));
    store.add_item(&product(2, 50_000), qty(2));
    store.update_quantity(ProductId::new(1), 4);

    assert_eq!(store.total(), amount(500_000));
    assert_eq!(store.item_count(), 6);
}
