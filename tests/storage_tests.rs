use proptest::prelude::*;
use std::io::Write;
use stockroom::{Inventory, Product, SnapshotStore};
use tempfile::{NamedTempFile, TempDir};

// Test fixtures

fn sample_inventory() -> Inventory {
    Inventory::from_products(vec![
        Product::new("Widget", 12.5, 4, "ITM003"),
        Product::new("Gadget", 0.99, 0, "ITM001"),
        Product::new("Ünïcode Gizmo", 1000.0, 250, "ITM002"),
    ])
}

fn store_with_content(content: &str) -> (SnapshotStore, NamedTempFile) {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    (SnapshotStore::new(temp_file.path()), temp_file)
}

// Round trip

#[test]
fn test_save_then_load_preserves_records_and_order() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp_dir.path().join("inventory_data.json"));
    let inventory = sample_inventory();

    store.try_save(&inventory).unwrap();
    let loaded = store.load();

    assert_eq!(loaded, inventory);
    let codes: Vec<&str> = loaded.iter().map(|p| p.item_code.as_str()).collect();
    assert_eq!(codes, vec!["ITM003", "ITM001", "ITM002"]);
}

#[test]
fn test_save_overwrites_previous_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp_dir.path().join("inventory_data.json"));

    store.save(&sample_inventory());
    let mut smaller = store.load();
    smaller.delete("ITM001");
    smaller.delete("ITM002");
    store.save(&smaller);

    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.products()[0].name, "Widget");
}

#[test]
fn test_snapshot_file_format() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp_dir.path().join("inventory_data.json"));
    store
        .try_save(&Inventory::from_products(vec![Product::new(
            "Widget", 2.5, 3, "ITM001",
        )]))
        .unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"name": "Widget", "price": 2.5, "stock": 3, "item_code": "ITM001"}
        ])
    );
}

// Loading snapshots written by hand

#[test]
fn test_load_accepts_integer_prices() {
    let (store, _file) = store_with_content(
        r#"[{"name": "Bolt", "price": 3, "stock": 12, "item_code": "ITM001"}]"#,
    );
    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.products()[0].price, 3.0);
}

#[test]
fn test_load_empty_list() {
    let (store, _file) = store_with_content("[]");
    assert!(store.load().is_empty());
}

// Degraded snapshots fall back to an empty inventory

#[test]
fn test_load_missing_file() {
    let store = SnapshotStore::new("/this/file/does/not/exist.json");
    assert!(store.load().is_empty());
    assert!(store.try_load().is_err());
}

#[test]
fn test_load_corrupted_json() {
    let (store, _file) = store_with_content("[{\"name\": \"Bolt\", ");
    assert!(store.load().is_empty());
}

#[test]
fn test_load_empty_file() {
    let (store, _file) = store_with_content("");
    assert!(store.load().is_empty());
}

#[test]
fn test_load_missing_field() {
    let (store, _file) =
        store_with_content(r#"[{"name": "Bolt", "price": 3.0, "item_code": "ITM001"}]"#);
    assert!(store.load().is_empty());
}

#[test]
fn test_load_negative_stock_keeps_backup() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp_dir.path().join("inventory_data.json"));
    let content = r#"[
        {"name": "Bolt", "price": 3.0, "stock": 4, "item_code": "ITM001"},
        {"name": "Nut", "price": 1.0, "stock": -2, "item_code": "ITM002"}
    ]"#;
    std::fs::write(store.path(), content).unwrap();

    let mut inventory = store.load();
    assert!(inventory.is_empty());

    // The next save replaces the snapshot, the backup keeps the old records
    inventory.add("Washer", 0.1, 100).unwrap();
    store.save(&inventory);
    assert_eq!(store.load().len(), 1);
    assert_eq!(std::fs::read_to_string(store.backup_path()).unwrap(), content);
}

#[test]
fn test_load_fractional_stock() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp_dir.path().join("inventory_data.json"));
    std::fs::write(
        store.path(),
        r#"[{"name": "Bolt", "price": 3.0, "stock": 2.5, "item_code": "ITM001"}]"#,
    )
    .unwrap();
    assert!(store.load().is_empty());
    assert!(store.backup_path().exists());
}

#[test]
fn test_load_whole_number_float_stock() {
    let (store, _file) = store_with_content(
        r#"[{"name": "Bolt", "price": 3.0, "stock": 5.0, "item_code": "ITM001"}]"#,
    );
    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.products()[0].stock, 5);
}

#[test]
fn test_load_wrong_shape() {
    let (store, _file) = store_with_content(r#"{"products": []}"#);
    assert!(store.load().is_empty());
}

// Round trip over generated inventories

fn product_strategy() -> impl Strategy<Value = Product> {
    (
        "\\PC{1,24}",
        (1u32..10_000_000).prop_map(|cents| f64::from(cents) / 100.0),
        any::<u32>(),
        (1u64..100_000).prop_map(|n| format!("ITM{:03}", n)),
    )
        .prop_map(|(name, price, stock, code)| Product::new(name, price, stock, code))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_save_then_load_reproduces_generated_inventory(
        products in prop::collection::vec(product_strategy(), 0..25)
    ) {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path().join("inventory_data.json"));
        let inventory = Inventory::from_products(products);

        store.try_save(&inventory).unwrap();
        prop_assert_eq!(store.try_load().unwrap(), inventory);
    }
}
