//! Stockroom - minimal inventory tracker
//!
//! Keeps an ordered list of products in memory, persists it to a single JSON
//! snapshot after every change, and serves a small web UI on top.

pub mod error;
pub mod inventory;
pub mod models;
pub mod service;
pub mod storage;
pub mod web;

pub use error::{InputError, Rejection, ServiceError, StoreError, StoreResult};
pub use inventory::{Inventory, DEFAULT_LOW_STOCK_THRESHOLD};
pub use models::Product;
pub use service::{InventoryService, Summary};
pub use storage::SnapshotStore;
