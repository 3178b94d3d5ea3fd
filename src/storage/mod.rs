//! Persistence for the [`AppData`] aggregate.
//!
//! The whole aggregate is stored as one JSON blob under [`APP_DATA_KEY`] in a
//! [`KeyValueStore`]. [`Store`] owns the medium and an in-memory copy of the
//! aggregate; repositories read the copy, mutate it in place and then call
//! [`Store::persist`], which rewrites the full blob.
//!
//! - [`medium`]: key-value media (files, memory)
//! - [`types`]: the on-disk envelope
//! - [`serialization`]: encode and versioned decode with migrations
//! - [`seed`]: the first-launch sample dataset

pub mod medium;
pub mod seed;
pub mod serialization;
pub mod types;

pub use medium::{FileStore, KeyValueStore, MemoryStore};

use crate::error::AppError;
use crate::models::AppData;

/// Storage key of the aggregate blob.
pub const APP_DATA_KEY: &str = "stockpilot_app_data_v2";

/// Key used by the unversioned format. Never read; data under it is foreign.
pub const LEGACY_APP_DATA_KEY: &str = "stockpilot_app_data";

/// How [`Store::open`] obtained its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A current-version blob was read as is.
    Loaded,
    /// A blob with an older schema was upgraded and written back.
    Migrated { from: u32 },
    /// Nothing was stored; the seed dataset was written.
    Seeded,
    /// The stored blob was unreadable or invalid and was replaced by the seed.
    Reset,
    /// The medium failed on read; the seed is used in memory only.
    Unavailable,
}

/// The single owner of the persisted aggregate.
pub struct Store {
    medium: Box<dyn KeyValueStore>,
    data: AppData,
    outcome: LoadOutcome,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("outcome", &self.outcome)
            .field("inventories", &self.data.inventories.len())
            .field("products", &self.data.products.len())
            .field("product_stocks", &self.data.product_stocks.len())
            .finish()
    }
}

impl Store {
    /// Load the aggregate from `medium`, seeding or resetting as needed.
    ///
    /// Never fails: every failure path ends with the seed dataset in memory.
    pub fn open(medium: impl KeyValueStore + 'static) -> Self {
        let mut store = Self {
            medium: Box::new(medium),
            data: AppData::default(),
            outcome: LoadOutcome::Unavailable,
        };
        store.reload();
        store
    }

    /// Re-read the aggregate from the medium, discarding the cached copy.
    pub fn reload(&mut self) -> LoadOutcome {
        let (data, outcome) = match self.medium.get(APP_DATA_KEY) {
            Ok(None) => {
                tracing::info!("no stored app data; writing seed dataset");
                (seed::seed_data(), LoadOutcome::Seeded)
            }
            Ok(Some(raw)) => match serialization::decode(&raw) {
                Ok(decoded) if decoded.migrated() => {
                    tracing::info!(
                        from = decoded.stored_version,
                        to = serialization::CURRENT_SCHEMA_VERSION,
                        "migrated stored app data"
                    );
                    let from = decoded.stored_version;
                    (decoded.data, LoadOutcome::Migrated { from })
                }
                Ok(decoded) => (decoded.data, LoadOutcome::Loaded),
                Err(e) => {
                    tracing::warn!(error = %e, "stored app data is invalid; resetting to seed dataset");
                    (seed::seed_data(), LoadOutcome::Reset)
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "cannot read app data; using seed dataset");
                (seed::seed_data(), LoadOutcome::Unavailable)
            }
        };

        self.data = data;
        self.outcome = outcome;
        if !matches!(outcome, LoadOutcome::Loaded | LoadOutcome::Unavailable) {
            self.persist();
        }
        tracing::debug!(
            inventories = self.data.inventories.len(),
            products = self.data.products.len(),
            "app data ready"
        );
        outcome
    }

    /// How the current data was obtained by the last load.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// The cached aggregate.
    pub fn data(&self) -> &AppData {
        &self.data
    }

    /// Mutable access to the cached aggregate. Callers must [`persist`](Self::persist).
    pub(crate) fn data_mut(&mut self) -> &mut AppData {
        &mut self.data
    }

    /// Replace the aggregate and write it to the medium.
    pub fn save(&mut self, data: AppData) {
        self.data = data;
        self.persist();
    }

    /// Write the cached aggregate, logging and dropping any medium error.
    pub fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            tracing::error!(error = %e, "app data not saved");
        }
    }

    /// Write the cached aggregate, returning any encode or medium error.
    pub fn try_persist(&mut self) -> Result<(), AppError> {
        let raw = serialization::encode(&self.data)?;
        self.medium.set(APP_DATA_KEY, &raw)
    }

    pub fn medium(&self) -> &dyn KeyValueStore {
        &*self.medium
    }

    pub fn medium_mut(&mut self) -> &mut dyn KeyValueStore {
        &mut *self.medium
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{seeded_store, FailingStore};
    use super::*;

    #[test]
    fn empty_medium_is_seeded_and_persisted() {
        let store = seeded_store();
        assert_eq!(store.load_outcome(), LoadOutcome::Seeded);
        assert!(store.data().inventories.contains_key("inv_1"));

        let raw = store
            .medium()
            .get(APP_DATA_KEY)
            .expect("get")
            .expect("seed must be written immediately");
        assert!(raw.contains("\"schemaVersion\":2"));
    }

    #[test]
    fn reload_reads_back_saved_data() {
        let mut store = seeded_store();
        let mut data = store.data().clone();
        data.inventories
            .get_mut("inv_1")
            .expect("seed inventory")
            .name = "Renamed".to_string();
        store.save(data.clone());

        assert_eq!(store.reload(), LoadOutcome::Loaded);
        assert_eq!(store.data(), &data);
    }

    #[test]
    fn invalid_blob_is_replaced_by_seed() {
        let medium = MemoryStore::with_value(
            APP_DATA_KEY,
            r#"{ "inventories": { "x": { "id": "x" } }, "products": {} }"#,
        );
        let store = Store::open(medium);
        assert_eq!(store.load_outcome(), LoadOutcome::Reset);
        assert!(store.data().inventories.contains_key("inv_1"));

        let raw = store.medium().get(APP_DATA_KEY).expect("get").expect("written");
        assert!(!raw.contains("\"x\""));
    }

    #[test]
    fn legacy_blob_is_migrated_and_rewritten() {
        let medium = MemoryStore::with_value(
            APP_DATA_KEY,
            r#"{
                "inventories": { "inv_9": { "id": "inv_9", "name": "Van", "iconId": "truck",
                                            "locations": [{ "id": "l", "name": "Back" }],
                                            "productIds": [], "criticalThresholds": {} } },
                "products": {},
                "productStocks": {}
            }"#,
        );
        let store = Store::open(medium);
        assert_eq!(store.load_outcome(), LoadOutcome::Migrated { from: 1 });
        assert_eq!(store.data().inventories["inv_9"].name, "Van");

        let raw = store.medium().get(APP_DATA_KEY).expect("get").expect("written");
        assert!(raw.contains("\"schemaVersion\":2"));
    }

    #[test]
    fn legacy_inventory_without_icon_is_migrated_not_reset() {
        let medium = MemoryStore::with_value(
            APP_DATA_KEY,
            r#"{
                "inventories": { "inv_a": { "id": "inv_a", "name": "Van",
                                            "locations": [{ "id": "l", "name": "Back" }] } },
                "products": {}
            }"#,
        );
        let store = Store::open(medium);
        assert_eq!(store.load_outcome(), LoadOutcome::Migrated { from: 1 });
        assert!(store.data().inventories.contains_key("inv_a"));
        assert!(!store.data().inventories.contains_key("inv_1"));
        assert_eq!(store.data().inventories["inv_a"].icon_id, "package");
    }

    #[test]
    fn legacy_key_is_ignored() {
        let medium = MemoryStore::with_value(
            LEGACY_APP_DATA_KEY,
            r#"{ "inventories": { "old": { "id": "old", "name": "Old" } }, "products": {} }"#,
        );
        let store = Store::open(medium);
        assert_eq!(store.load_outcome(), LoadOutcome::Seeded);
        assert!(!store.data().inventories.contains_key("old"));
    }

    #[test]
    fn unreadable_medium_falls_back_to_seed_without_writing() {
        let store = Store::open(FailingStore {
            fail_reads: true,
            ..FailingStore::default()
        });
        assert_eq!(store.load_outcome(), LoadOutcome::Unavailable);
        assert!(store.data().inventories.contains_key("inv_1"));
    }

    #[test]
    fn failed_write_keeps_cache_and_reports_through_try_persist() {
        let mut store = Store::open(FailingStore::default());
        let mut data = store.data().clone();
        data.products.clear();
        store.save(data);

        assert!(store.data().products.is_empty());
        assert!(matches!(store.try_persist(), Err(AppError::Storage(_))));
    }
}
