//! Inventory repository.

use std::collections::HashSet;

use crate::ids;
use crate::models::{Inventory, InventoryUpdate, Location, NewLocation};
use crate::storage::Store;

/// All inventories, ordered by id.
pub fn list_inventories(store: &Store) -> Vec<Inventory> {
    store.data().inventories.values().cloned().collect()
}

pub fn get_inventory(store: &Store, id: &str) -> Option<Inventory> {
    store.data().inventories.get(id).cloned()
}

/// Create an inventory with freshly assigned inventory and location ids.
///
/// Any name, icon or location list is accepted; validation happens in the
/// caller.
pub fn create_inventory(
    store: &mut Store,
    name: &str,
    icon_id: &str,
    locations: &[NewLocation],
) -> Inventory {
    let inventory = Inventory {
        id: ids::inventory_id(),
        name: name.to_string(),
        icon_id: icon_id.to_string(),
        locations: locations
            .iter()
            .map(|l| Location {
                id: ids::location_id(),
                name: l.name.clone(),
            })
            .collect(),
        product_ids: Vec::new(),
        critical_thresholds: Default::default(),
    };

    store
        .data_mut()
        .inventories
        .insert(inventory.id.clone(), inventory.clone());
    store.persist();
    tracing::debug!(inventory = %inventory.id, locations = inventory.locations.len(), "inventory created");
    inventory
}

/// Rename, re-icon and replace the locations of an inventory.
///
/// Existing locations absent from `update.locations` are deleted and their
/// counts pruned from every stock row of this inventory. Locations without an
/// id get a fresh one. Returns `None` if the inventory does not exist.
pub fn update_inventory(store: &mut Store, id: &str, update: InventoryUpdate) -> Option<Inventory> {
    let data = store.data_mut();
    let inventory = data.inventories.get_mut(id)?;

    inventory.name = update.name;
    inventory.icon_id = update.icon_id;

    let kept: HashSet<&str> = update
        .locations
        .iter()
        .filter_map(|l| l.id.as_deref())
        .filter(|id| !id.is_empty())
        .collect();
    let removed: Vec<String> = inventory
        .locations
        .iter()
        .filter(|loc| !kept.contains(loc.id.as_str()))
        .map(|loc| loc.id.clone())
        .collect();

    inventory.locations = update
        .locations
        .into_iter()
        .map(|l| Location {
            id: l.id.filter(|id| !id.is_empty()).unwrap_or_else(ids::location_id),
            name: l.name,
        })
        .collect();

    let updated = inventory.clone();

    if !removed.is_empty() {
        for stock in data
            .product_stocks
            .values_mut()
            .filter(|s| s.inventory_id == id)
        {
            for loc_id in &removed {
                stock.stock_by_location.remove(loc_id);
            }
        }
        tracing::debug!(inventory = %id, removed = ?removed, "locations removed");
    }

    store.persist();
    Some(updated)
}

/// Delete an inventory and every stock row scoped to it, including rows for
/// products no longer linked. Catalog products are kept.
///
/// Returns the removed inventory, or `None` if it did not exist.
pub fn delete_inventory(store: &mut Store, id: &str) -> Option<Inventory> {
    let data = store.data_mut();
    let inventory = data.inventories.remove(id)?;

    data.product_stocks.retain(|_, s| s.inventory_id != id);

    store.persist();
    tracing::debug!(inventory = %id, "inventory deleted");
    Some(inventory)
}
