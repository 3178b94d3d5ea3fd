//! Inventory and location data model.
//!
//! An [`Inventory`] exclusively owns its [`Location`]s, its display order
//! (`product_ids`) and its per-product critical thresholds. Products
//! themselves live in the global catalog and are only referenced here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Upper bound on locations per inventory, enforced by the command layer.
pub const MAX_LOCATIONS: usize = 3;

/// A named stock location (e.g. warehouse, shop, vehicle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    /// User-editable display name; not required to be unique.
    pub name: String,
}

/// A named inventory with up to [`MAX_LOCATIONS`] locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: String,
    pub name: String,
    pub icon_id: String,
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Membership and display order of the inventory's products.
    #[serde(default)]
    pub product_ids: Vec<String>,
    /// Sparse `product_id -> threshold` table scoped to this inventory.
    #[serde(default)]
    pub critical_thresholds: BTreeMap<String, u32>,
}

impl Inventory {
    /// Returns `true` if `product_id` is a member of this inventory.
    pub fn contains_product(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|id| id == product_id)
    }

    pub fn location(&self, location_id: &str) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.id == location_id)
    }
}

/// A location supplied at inventory creation time (ids are assigned by the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub name: String,
}

/// A location in an inventory edit.
///
/// `id` is `None` (or empty) for locations added during the edit; existing
/// locations keep their id. Any existing location missing from the edit is
/// treated as deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Fields replaced by an inventory edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    pub name: String,
    pub icon_id: String,
    pub locations: Vec<LocationUpdate>,
}
