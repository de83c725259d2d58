//! JSON snapshot of the whole inventory
//!
//! The file is rewritten wholesale on every save. A missing or broken file
//! is never fatal: loading falls back to an empty inventory.

use crate::error::StoreResult;
use crate::inventory::Inventory;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name used when no explicit path is configured
pub const DEFAULT_SNAPSHOT_FILE: &str = "inventory_data.json";

/// Reads and writes the inventory snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default snapshot location: `<data dir>/stockroom/inventory_data.json`
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stockroom")
            .join(DEFAULT_SNAPSHOT_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, or start empty if it is missing or unreadable
    pub fn load(&self) -> Inventory {
        if !self.path.exists() {
            log::info!(
                "No inventory file at {}, starting with an empty inventory",
                self.path.display()
            );
            return Inventory::new();
        }

        match self.try_load() {
            Ok(inventory) => {
                log::info!(
                    "Loaded {} products from {}",
                    inventory.len(),
                    self.path.display()
                );
                inventory
            }
            Err(e) => {
                log::warn!(
                    "Could not read {}, starting with an empty inventory: {}",
                    self.path.display(),
                    e
                );
                self.backup_unreadable();
                Inventory::new()
            }
        }
    }

    /// Where an unreadable snapshot is copied before it can be overwritten
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn backup_unreadable(&self) {
        let backup = self.backup_path();
        match std::fs::copy(&self.path, &backup) {
            Ok(_) => log::warn!(
                "Copied unreadable inventory file to {}; {} will be overwritten on the next save",
                backup.display(),
                self.path.display()
            ),
            Err(e) => log::warn!(
                "Could not back up {} to {} ({}); it will be overwritten on the next save",
                self.path.display(),
                backup.display(),
                e
            ),
        }
    }

    /// Load the snapshot, surfacing any read or parse error
    pub fn try_load(&self) -> StoreResult<Inventory> {
        let content = std::fs::read_to_string(&self.path)?;
        let inventory = serde_json::from_str(&content)?;
        Ok(inventory)
    }

    /// Write the snapshot. Failures are logged and otherwise swallowed;
    /// the in-memory inventory is never touched.
    pub fn save(&self, inventory: &Inventory) {
        if let Err(e) = self.try_save(inventory) {
            log::error!(
                "Could not save inventory file {}: {}",
                self.path.display(),
                e
            );
        }
    }

    /// Write the snapshot, surfacing any I/O or encoding error
    pub fn try_save(&self, inventory: &Inventory) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = to_snapshot_json(inventory)?;
        std::fs::write(&self.path, content)?;

        log::debug!(
            "Saved {} products to {}",
            inventory.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Pretty JSON with four-space indentation
fn to_snapshot_json(inventory: &Inventory) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    inventory.serialize(&mut ser)?;
    Ok(buf)
}
