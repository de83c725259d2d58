//! Caller-facing inventory operations
//!
//! Turns raw form strings into typed requests, applies them to the shared
//! inventory under a single lock, and persists after every successful change.

use crate::error::{InputError, Rejection, ServiceError};
use crate::inventory::{Inventory, DEFAULT_LOW_STOCK_THRESHOLD};
use crate::models::Product;
use crate::storage::SnapshotStore;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Aggregate figures for the overview page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_value: f64,
    pub low_stock_count: usize,
    pub product_count: usize,
    pub low_stock_threshold: u32,
}

/// Shared inventory plus the snapshot it is persisted to
pub struct InventoryService {
    inventory: Mutex<Inventory>,
    store: SnapshotStore,
    low_stock_threshold: u32,
}

impl InventoryService {
    pub fn new(inventory: Inventory, store: SnapshotStore) -> Self {
        Self {
            inventory: Mutex::new(inventory),
            store,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    /// Load the inventory from `store` and wrap it in a service
    pub fn open(store: SnapshotStore) -> Self {
        let inventory = store.load();
        Self::new(inventory, store)
    }

    pub fn with_low_stock_threshold(mut self, threshold: u32) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    fn lock(&self) -> MutexGuard<'_, Inventory> {
        self.inventory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// All products ordered by item code
    pub fn list(&self) -> Vec<Product> {
        self.lock().sorted_by_code().into_iter().cloned().collect()
    }

    pub fn summary(&self) -> Summary {
        let inventory = self.lock();
        Summary {
            total_value: inventory.total_value(),
            low_stock_count: inventory.low_stock_items(self.low_stock_threshold).len(),
            product_count: inventory.len(),
            low_stock_threshold: self.low_stock_threshold,
        }
    }

    /// Products below the configured low-stock threshold
    pub fn low_stock(&self) -> Vec<Product> {
        self.lock()
            .low_stock_items(self.low_stock_threshold)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get(&self, code: &str) -> Result<Product, ServiceError> {
        self.lock()
            .find_by_code(code)
            .cloned()
            .ok_or_else(|| not_found(code))
    }

    /// Create a product from raw form input
    pub fn create(&self, name: &str, price: &str, stock: &str) -> Result<Product, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InputError::MissingName.into());
        }
        let price = parse_price(price)?;
        let stock = parse_stock(stock)?;

        let mut inventory = self.lock();
        let product = inventory.add(name, price, stock)?.clone();
        self.store.save(&inventory);

        log::info!("Added product {}", product);
        Ok(product)
    }

    /// Update stock and/or price from raw form input.
    ///
    /// A missing or blank value leaves that field unchanged.
    pub fn update(
        &self,
        code: &str,
        stock: Option<&str>,
        price: Option<&str>,
    ) -> Result<Product, ServiceError> {
        let stock = non_blank(stock).map(parse_stock).transpose()?;
        let price = non_blank(price).map(parse_price).transpose()?;

        let mut inventory = self.lock();
        let product = inventory.update_details(code, stock, price)?.clone();
        self.store.save(&inventory);

        log::info!("Updated product {}", product);
        Ok(product)
    }

    pub fn delete(&self, code: &str) -> Result<Product, ServiceError> {
        let mut inventory = self.lock();
        let product = inventory.delete(code).ok_or_else(|| not_found(code))?;
        self.store.save(&inventory);

        log::info!("Deleted product {}", product.item_code);
        Ok(product)
    }
}

fn not_found(code: &str) -> ServiceError {
    Rejection::NotFound(code.trim().to_uppercase()).into()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_price(raw: &str) -> Result<f64, InputError> {
    let raw = raw.trim();
    raw.parse().map_err(|_| InputError::InvalidNumber {
        field: "price",
        value: raw.to_string(),
    })
}

fn parse_stock(raw: &str) -> Result<i64, InputError> {
    let raw = raw.trim();
    raw.parse().map_err(|_| InputError::InvalidNumber {
        field: "stock",
        value: raw.to_string(),
    })
}
