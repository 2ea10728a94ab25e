//! Slot-file storage. Each slot is one JSON document in the data directory
//! (`<slot>.json`). Loads are fail-soft: a missing or garbled slot reads as
//! empty rather than an error. Every mutation writes its slot back in full.

use std::collections::BTreeMap;
use std::path::PathBuf;

use uuid::Uuid;

use crate::error::Result;
use crate::models::{MonthlyTarget, NewSale, Sale};
use crate::settings;

pub const SALES_SLOT: &str = "sales";
pub const TARGETS_SLOT: &str = "monthly_targets";
pub const DARK_MODE_SLOT: &str = "dark_mode";

#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Storage rooted at the configured data directory.
    pub fn open_default() -> Self {
        Self::new(settings::get_data_dir())
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    /// Raw contents of a slot, or None when the file is missing or unreadable.
    pub fn read(&self, slot: &str) -> Option<String> {
        std::fs::read_to_string(self.slot_path(slot)).ok()
    }

    pub fn write(&self, slot: &str, contents: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.slot_path(slot), format!("{contents}\n"))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

/// The full sale history, kept in insertion order. Mutations persist the
/// whole slot before returning.
pub struct SalesStore {
    storage: Storage,
    sales: Vec<Sale>,
}

impl SalesStore {
    pub fn load(storage: Storage) -> Self {
        let sales = storage
            .read(SALES_SLOT)
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self { storage, sales }
    }

    pub fn all(&self) -> &[Sale] {
        &self.sales
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Append a sale, assign it a fresh id, and persist. Returns the id.
    pub fn add(&mut self, new: NewSale) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.sales.push(new.into_sale(id.clone()));
        self.persist()?;
        Ok(id)
    }

    /// Remove the sale with the given id. Persists whether or not anything
    /// matched; returns whether a sale was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.sales.len();
        self.sales.retain(|s| s.id != id);
        let removed = self.sales.len() != before;
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.sales)?;
        self.storage.write(SALES_SLOT, &json)
    }
}

// ---------------------------------------------------------------------------
// Monthly targets
// ---------------------------------------------------------------------------

/// Targets keyed by "YYYY-MM". Months without an entry fall back to the
/// default benchmarks on read.
pub struct TargetStore {
    storage: Storage,
    targets: BTreeMap<String, MonthlyTarget>,
}

impl TargetStore {
    pub fn load(storage: Storage) -> Self {
        let targets = storage
            .read(TARGETS_SLOT)
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self { storage, targets }
    }

    pub fn get(&self, month: &str) -> MonthlyTarget {
        self.targets.get(month).copied().unwrap_or_default()
    }

    /// True if the month has an explicitly saved target.
    pub fn is_set(&self, month: &str) -> bool {
        self.targets.contains_key(month)
    }

    pub fn set(&mut self, month: &str, target: MonthlyTarget) -> Result<()> {
        self.targets.insert(month.to_string(), target);
        let json = serde_json::to_string_pretty(&self.targets)?;
        self.storage.write(TARGETS_SLOT, &json)
    }
}

// ---------------------------------------------------------------------------
// Dark mode
// ---------------------------------------------------------------------------

pub fn load_dark_mode(storage: &Storage) -> bool {
    storage
        .read(DARK_MODE_SLOT)
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or(false)
}

pub fn save_dark_mode(storage: &Storage, on: bool) -> Result<()> {
    storage.write(DARK_MODE_SLOT, if on { "true" } else { "false" })
}
