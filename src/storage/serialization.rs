//! Encoding and versioned decoding of the persisted [`AppData`] blob.
//!
//! # Encode
//! Wrap the aggregate in a [`StoredAppData`] envelope tagged with
//! [`CURRENT_SCHEMA_VERSION`] and serialize it to compact JSON.
//!
//! # Decode
//! 1. Parse the blob as a JSON value.
//! 2. A blob without `schemaVersion` is legacy schema 1. It must pass the
//!    structural check (an `inventories` object whose entries all carry a
//!    `name`) or it is rejected.
//! 3. Run the migration chain one version at a time up to
//!    [`CURRENT_SCHEMA_VERSION`]. Newer versions are rejected.
//! 4. Decode the migrated value into typed [`AppData`].

use serde_json::{Map, Value};

use super::types::{StoredAppData, StoredAppDataRef};
use crate::catalog;
use crate::error::AppError;
use crate::models::{AppData, ProductImage};

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Version assigned to blobs that carry no `schemaVersion` tag.
pub const LEGACY_SCHEMA_VERSION: u32 = 1;

/// Version string embedded in every saved blob.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result of a successful [`decode`].
#[derive(Debug)]
pub struct Decoded {
    pub data: AppData,
    /// Schema version the blob was stored with.
    pub stored_version: u32,
}

impl Decoded {
    /// Whether the blob was upgraded and should be written back.
    pub fn migrated(&self) -> bool {
        self.stored_version != CURRENT_SCHEMA_VERSION
    }
}

/// Serialize `data` into the current envelope format.
pub fn encode(data: &AppData) -> Result<String, AppError> {
    let stored = StoredAppDataRef {
        schema_version: CURRENT_SCHEMA_VERSION,
        app_version: APP_VERSION,
        saved_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        data,
    };
    serde_json::to_string(&stored)
        .map_err(|e| AppError::Serialization(format!("cannot serialize app data: {e}")))
}

/// Parse, validate and migrate a stored blob.
///
/// Returns [`AppError::Serialization`] for malformed JSON or a blob that does
/// not decode after migration, and [`AppError::Schema`] for legacy data that
/// fails the structural check or a schema version newer than this build.
pub fn decode(raw: &str) -> Result<Decoded, AppError> {
    let mut value: Value = serde_json::from_str(raw)
        .map_err(|e| AppError::Serialization(format!("stored app data is not JSON: {e}")))?;

    let root = value
        .as_object_mut()
        .ok_or_else(|| AppError::Schema("stored app data is not a JSON object".to_string()))?;

    let stored_version = match root.get("schemaVersion") {
        None => {
            check_legacy_shape(root)?;
            LEGACY_SCHEMA_VERSION
        }
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| AppError::Schema(format!("invalid schemaVersion {v}")))?,
    };

    if stored_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Schema(format!(
            "unsupported schema version {stored_version}; this build reads up to {CURRENT_SCHEMA_VERSION}"
        )));
    }
    if stored_version < LEGACY_SCHEMA_VERSION {
        return Err(AppError::Schema(format!(
            "unsupported schema version {stored_version}"
        )));
    }

    let mut version = stored_version;
    while version < CURRENT_SCHEMA_VERSION {
        match version {
            1 => migrate_v1_to_v2(root),
            other => {
                return Err(AppError::Schema(format!(
                    "no migration from schema version {other}"
                )))
            }
        }
        version += 1;
    }
    root.insert("schemaVersion".to_string(), Value::from(version));

    let stored: StoredAppData = serde_json::from_value(value)
        .map_err(|e| AppError::Serialization(format!("cannot decode app data: {e}")))?;

    Ok(Decoded {
        data: stored.data,
        stored_version,
    })
}

/// Structural gate for unversioned blobs: every inventory must have a `name`.
fn check_legacy_shape(root: &Map<String, Value>) -> Result<(), AppError> {
    let inventories = root
        .get("inventories")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::Schema("legacy app data has no inventories map".to_string()))?;

    for (id, inv) in inventories {
        let has_name = inv.as_object().is_some_and(|o| o.contains_key("name"));
        if !has_name {
            return Err(AppError::Schema(format!(
                "legacy inventory {id} has no name"
            )));
        }
    }
    Ok(())
}

/// Schema 1 → 2: products gain `purchasePrice: 0`; optional tables default
/// to empty.
///
/// Fields legacy writers could omit are filled so a blob that passed
/// [`check_legacy_shape`] decodes: missing ids come from the map key, a
/// missing inventory icon or product image becomes the default icon.
fn migrate_v1_to_v2(root: &mut Map<String, Value>) {
    if let Some(inventories) = root.get_mut("inventories").and_then(Value::as_object_mut) {
        for (id, inventory) in inventories.iter_mut() {
            if let Some(inv) = inventory.as_object_mut() {
                inv.entry("id").or_insert_with(|| Value::from(id.as_str()));
                inv.entry("iconId")
                    .or_insert_with(|| Value::from(catalog::DEFAULT_ICON));
            }
        }
    }
    if let Some(products) = root.get_mut("products").and_then(Value::as_object_mut) {
        for (id, product) in products.iter_mut() {
            if let Some(p) = product.as_object_mut() {
                p.entry("id").or_insert_with(|| Value::from(id.as_str()));
                p.entry("name").or_insert_with(|| Value::from(""));
                p.entry("code").or_insert_with(|| Value::from(""));
                p.entry("image").or_insert_with(|| {
                    serde_json::to_value(ProductImage::icon(catalog::DEFAULT_ICON))
                        .unwrap_or(Value::Null)
                });
                p.entry("purchasePrice").or_insert_with(|| Value::from(0));
            }
        }
    }
    root.entry("products")
        .or_insert_with(|| Value::Object(Map::new()));
    root.entry("productStocks")
        .or_insert_with(|| Value::Object(Map::new()));
}
