//! Product repository.
//!
//! Products live in the global catalog (`AppData::products`) and are linked
//! into inventories through `Inventory::product_ids`, a per-inventory
//! threshold and a [`ProductStock`] row. Removing a product from an
//! inventory never removes it from the catalog: the same product may still
//! be linked elsewhere, and unlinked products stay reachable by id.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::catalog;
use crate::error::AppError;
use crate::ids;
use crate::models::{
    stock_key, Inventory, NewProduct, Product, ProductDetails, ProductImage, ProductStock,
};
use crate::storage::Store;

/// A product with its stock row in one inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithStock {
    pub product: Product,
    pub stock: ProductStock,
}

/// A product with its stock row and the inventory it was resolved in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEntry {
    pub product: Product,
    pub stock: ProductStock,
    pub inventory: Inventory,
}

/// Direction for a single-step move in the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Threshold for `product_id` in `inventory`; a missing entry is zero.
pub fn critical_threshold(inventory: &Inventory, product_id: &str) -> u32 {
    inventory
        .critical_thresholds
        .get(product_id)
        .copied()
        .unwrap_or(0)
}

/// Every catalog product, including ones no inventory links any more.
pub fn list_catalog(store: &Store) -> Vec<Product> {
    store.data().products.values().cloned().collect()
}

/// Products of an inventory in display order, each with its stock row.
///
/// Ids that no longer resolve to a catalog product are skipped. Returns an
/// empty list for a missing inventory.
pub fn list_products_with_stock(store: &Store, inventory_id: &str) -> Vec<ProductWithStock> {
    let data = store.data();
    let Some(inventory) = data.inventories.get(inventory_id) else {
        return Vec::new();
    };

    inventory
        .product_ids
        .iter()
        .filter_map(|product_id| {
            let product = data.products.get(product_id)?;
            Some(ProductWithStock {
                product: product.clone(),
                stock: data.stock_or_empty(inventory_id, product_id),
            })
        })
        .collect()
}

/// `None` if either the inventory or the product is missing.
pub fn get_product_with_stock(
    store: &Store,
    inventory_id: &str,
    product_id: &str,
) -> Option<ProductEntry> {
    let data = store.data();
    let inventory = data.inventories.get(inventory_id)?;
    let product = data.products.get(product_id)?;
    Some(ProductEntry {
        product: product.clone(),
        stock: data.stock_or_empty(inventory_id, product_id),
        inventory: inventory.clone(),
    })
}

/// Stock row with one entry per inventory location, zero where `initial`
/// has none. Keys that are not locations of the inventory are dropped.
fn seeded_stock(
    inventory: &Inventory,
    product_id: &str,
    initial: &BTreeMap<String, u32>,
) -> ProductStock {
    ProductStock {
        product_id: product_id.to_string(),
        inventory_id: inventory.id.clone(),
        stock_by_location: inventory
            .locations
            .iter()
            .map(|loc| (loc.id.clone(), initial.get(&loc.id).copied().unwrap_or(0)))
            .collect(),
    }
}

/// Create a catalog product and link it at the top of an inventory.
///
/// The image falls back to the [`catalog::DEFAULT_ICON`] icon when the input
/// does not resolve. Returns `None` if the inventory does not exist.
pub fn add_product_to_inventory(
    store: &mut Store,
    inventory_id: &str,
    values: NewProduct,
) -> Option<ProductEntry> {
    let data = store.data_mut();
    let inventory = data.inventories.get_mut(inventory_id)?;

    let image = values
        .image
        .resolve()
        .unwrap_or_else(|| ProductImage::icon(catalog::DEFAULT_ICON));

    let product = Product {
        id: ids::product_id(),
        name: values.name,
        code: values.code,
        image,
        purchase_price: values.purchase_price,
        sale_price: values.sale_price,
    };

    inventory.product_ids.insert(0, product.id.clone());
    inventory
        .critical_thresholds
        .insert(product.id.clone(), values.critical_threshold);
    let stock = seeded_stock(inventory, &product.id, &values.initial_stocks);
    let inventory = inventory.clone();

    data.products.insert(product.id.clone(), product.clone());
    data.product_stocks
        .insert(stock_key(inventory_id, &product.id), stock.clone());

    store.persist();
    tracing::debug!(inventory = %inventory_id, product = %product.id, "product added");
    Some(ProductEntry {
        product,
        stock,
        inventory,
    })
}

/// Link an existing catalog product into another inventory.
///
/// If the product is already linked, nothing changes and the current entry
/// is returned. `None` if either side is missing.
pub fn attach_product_to_inventory(
    store: &mut Store,
    inventory_id: &str,
    product_id: &str,
    critical_threshold: u32,
    initial_stocks: &BTreeMap<String, u32>,
) -> Option<ProductEntry> {
    let data = store.data_mut();
    let product = data.products.get(product_id)?.clone();
    let inventory = data.inventories.get_mut(inventory_id)?;

    if inventory.contains_product(product_id) {
        return get_product_with_stock(store, inventory_id, product_id);
    }

    inventory.product_ids.insert(0, product_id.to_string());
    inventory
        .critical_thresholds
        .insert(product_id.to_string(), critical_threshold);
    let stock = seeded_stock(inventory, product_id, initial_stocks);
    let inventory = inventory.clone();
    data.product_stocks
        .insert(stock_key(inventory_id, product_id), stock.clone());

    store.persist();
    tracing::debug!(inventory = %inventory_id, product = %product_id, "product attached");
    Some(ProductEntry {
        product,
        stock,
        inventory,
    })
}

/// Set the absolute count at one location, creating the stock row if needed.
///
/// Overwrites rather than increments; the last write wins.
pub fn update_product_stock(
    store: &mut Store,
    inventory_id: &str,
    product_id: &str,
    location_id: &str,
    new_count: u32,
) {
    store
        .data_mut()
        .stock_entry(inventory_id, product_id)
        .stock_by_location
        .insert(location_id.to_string(), new_count);
    store.persist();
}

/// Apply `delta` to the stored count at one location.
///
/// Returns the new count, or `None` without writing when the result would be
/// negative or overflow.
pub fn adjust_product_stock(
    store: &mut Store,
    inventory_id: &str,
    product_id: &str,
    location_id: &str,
    delta: i64,
) -> Option<u32> {
    let current = store
        .data()
        .stock(inventory_id, product_id)
        .map_or(0, |s| s.count(location_id));
    let new_count = u32::try_from(i64::from(current).checked_add(delta)?).ok()?;
    update_product_stock(store, inventory_id, product_id, location_id, new_count);
    Some(new_count)
}

/// Replace the display order of an inventory's products.
///
/// `ordered_product_ids` must be a permutation of the current order: same
/// length, no duplicates, no unknown ids. Returns
/// [`AppError::InvalidReorder`] otherwise, or [`AppError::NotFound`] if the
/// inventory is missing. Nothing changes on error.
pub fn update_inventory_product_order(
    store: &mut Store,
    inventory_id: &str,
    ordered_product_ids: Vec<String>,
) -> Result<(), AppError> {
    {
        let unique: HashSet<&String> = ordered_product_ids.iter().collect();
        if unique.len() != ordered_product_ids.len() {
            return Err(AppError::InvalidReorder(
                "reorder list contains duplicate product ids".to_string(),
            ));
        }
    }

    let inventory = store
        .data_mut()
        .inventories
        .get_mut(inventory_id)
        .ok_or_else(|| AppError::NotFound(format!("inventory {inventory_id} not found")))?;

    if ordered_product_ids.len() != inventory.product_ids.len() {
        return Err(AppError::InvalidReorder(format!(
            "reorder list has {} ids but inventory has {} products",
            ordered_product_ids.len(),
            inventory.product_ids.len()
        )));
    }
    if let Some(unknown) = ordered_product_ids
        .iter()
        .find(|id| !inventory.contains_product(id))
    {
        return Err(AppError::InvalidReorder(format!(
            "product {unknown} is not in inventory {inventory_id}"
        )));
    }

    inventory.product_ids = ordered_product_ids;
    store.persist();
    Ok(())
}

/// Swap a product with its neighbour in the display order.
///
/// Returns `false` (no write) if the inventory or product is missing or the
/// product is already at that end of the list.
pub fn move_product(
    store: &mut Store,
    inventory_id: &str,
    product_id: &str,
    direction: MoveDirection,
) -> bool {
    let Some(inventory) = store.data_mut().inventories.get_mut(inventory_id) else {
        return false;
    };
    let Some(index) = inventory.product_ids.iter().position(|id| id == product_id) else {
        return false;
    };
    let target = match direction {
        MoveDirection::Up if index > 0 => index - 1,
        MoveDirection::Down if index + 1 < inventory.product_ids.len() => index + 1,
        _ => return false,
    };
    inventory.product_ids.swap(index, target);
    store.persist();
    true
}

/// Edit a product's fields and its threshold in one inventory.
///
/// The image is replaced only when the input resolves; otherwise the
/// previous image is kept. `None` if the product or inventory is missing.
pub fn update_product_details(
    store: &mut Store,
    product_id: &str,
    details: ProductDetails,
    inventory_id: &str,
) -> Option<Product> {
    let data = store.data_mut();
    if !data.products.contains_key(product_id) {
        return None;
    }
    let inventory = data.inventories.get_mut(inventory_id)?;
    inventory
        .critical_thresholds
        .insert(product_id.to_string(), details.critical_threshold);

    let product = data.products.get_mut(product_id)?;
    product.name = details.name;
    product.code = details.code;
    product.purchase_price = details.purchase_price;
    product.sale_price = details.sale_price;
    if let Some(image) = details.image.resolve() {
        product.image = image;
    }
    let updated = product.clone();

    store.persist();
    Some(updated)
}

/// Unlink a product from an inventory: order entry, threshold and stock row.
///
/// The catalog entry is kept. Returns `false` if the inventory is missing.
pub fn delete_product_from_inventory(store: &mut Store, inventory_id: &str, product_id: &str) -> bool {
    let data = store.data_mut();
    let Some(inventory) = data.inventories.get_mut(inventory_id) else {
        return false;
    };

    inventory.product_ids.retain(|id| id != product_id);
    inventory.critical_thresholds.remove(product_id);
    data.product_stocks.remove(&stock_key(inventory_id, product_id));

    store.persist();
    tracing::debug!(inventory = %inventory_id, product = %product_id, "product unlinked");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{total_stock, ImageInput, ImageRef, NewLocation};
    use crate::repository::inventories::{create_inventory, delete_inventory, get_inventory};
    use crate::storage::test_support::seeded_store;

    fn icon_product(name: &str, stocks: &[(&str, u32)]) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            code: format!("{}-01", name.to_uppercase()),
            critical_threshold: 4,
            purchase_price: 12.5,
            sale_price: Some(20.0),
            image: ImageInput::Icon {
                icon_id: "key".to_string(),
            },
            initial_stocks: stocks
                .iter()
                .map(|(loc, n)| (loc.to_string(), *n))
                .collect(),
        }
    }

    fn details(name: &str, image: ImageInput) -> ProductDetails {
        ProductDetails {
            name: name.to_string(),
            code: "NEW-CODE".to_string(),
            critical_threshold: 9,
            purchase_price: 1.0,
            sale_price: None,
            image,
        }
    }

    // ── listing ───────────────────────────────────────────────────────────────

    #[test]
    fn list_follows_display_order() {
        let store = seeded_store();
        let ids: Vec<String> = list_products_with_stock(&store, "inv_1")
            .into_iter()
            .map(|p| p.product.id)
            .collect();
        assert_eq!(ids, ["prod_1", "prod_2", "prod_3", "prod_4", "prod_5"]);
    }

    #[test]
    fn list_skips_ids_without_catalog_entry_and_defaults_stock() {
        let mut store = seeded_store();
        {
            let data = store.data_mut();
            data.products.remove("prod_2");
            data.product_stocks.remove(&stock_key("inv_1", "prod_3"));
        }
        let items = list_products_with_stock(&store, "inv_1");
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|p| p.product.id != "prod_2"));

        let prod_3 = items
            .iter()
            .find(|p| p.product.id == "prod_3")
            .expect("prod_3 listed");
        assert!(prod_3.stock.stock_by_location.is_empty());
        assert_eq!(prod_3.stock.inventory_id, "inv_1");
    }

    #[test]
    fn list_for_missing_inventory_is_empty() {
        let store = seeded_store();
        assert!(list_products_with_stock(&store, "inv_404").is_empty());
    }

    #[test]
    fn get_requires_both_inventory_and_product() {
        let store = seeded_store();
        assert!(get_product_with_stock(&store, "inv_1", "prod_1").is_some());
        assert!(get_product_with_stock(&store, "inv_404", "prod_1").is_none());
        assert!(get_product_with_stock(&store, "inv_1", "prod_404").is_none());
    }

    // ── add ───────────────────────────────────────────────────────────────────

    #[test]
    fn add_prepends_and_zero_fills_stock() {
        let mut store = seeded_store();
        let entry = add_product_to_inventory(
            &mut store,
            "inv_1",
            icon_product("Hinge", &[("loc_1", 7), ("loc_9", 3)]),
        )
        .expect("inventory exists");

        let inv = get_inventory(&store, "inv_1").expect("inv");
        assert_eq!(inv.product_ids[0], entry.product.id);
        assert_eq!(critical_threshold(&inv, &entry.product.id), 4);

        let got = get_product_with_stock(&store, "inv_1", &entry.product.id).expect("entry");
        assert_eq!(got.product, entry.product);
        assert_eq!(got.product.name, "Hinge");
        assert_eq!(got.product.sale_price, Some(20.0));
        assert_eq!(
            got.stock.stock_by_location,
            BTreeMap::from([
                ("loc_1".to_string(), 7),
                ("loc_2".to_string(), 0),
                ("loc_3".to_string(), 0),
            ])
        );
        assert_eq!(total_stock(Some(&got.stock), &inv.locations), 7);
    }

    #[test]
    fn add_with_unresolvable_image_falls_back_to_package_icon() {
        let mut store = seeded_store();
        let mut values = icon_product("Mystery", &[]);
        values.image = ImageInput::Upload {
            uploaded_image: String::new(),
        };
        let entry = add_product_to_inventory(&mut store, "inv_1", values).expect("added");
        assert_eq!(
            entry.product.image.representation(),
            ImageRef::Icon { icon_id: "package" }
        );
    }

    #[test]
    fn add_to_missing_inventory_is_none() {
        let mut store = seeded_store();
        let before = store.data().products.len();
        assert!(add_product_to_inventory(&mut store, "inv_404", icon_product("X", &[])).is_none());
        assert_eq!(store.data().products.len(), before);
    }

    // ── stock ─────────────────────────────────────────────────────────────────

    #[test]
    fn update_stock_overwrites_and_is_idempotent() {
        let mut store = seeded_store();
        update_product_stock(&mut store, "inv_1", "prod_1", "loc_2", 9);
        update_product_stock(&mut store, "inv_1", "prod_1", "loc_2", 9);
        let stock = store.data().stock("inv_1", "prod_1").expect("row");
        assert_eq!(stock.count("loc_2"), 9);
        assert_eq!(stock.count("loc_1"), 10);
    }

    #[test]
    fn update_stock_creates_missing_row() {
        let mut store = seeded_store();
        store
            .data_mut()
            .product_stocks
            .remove(&stock_key("inv_1", "prod_4"));
        update_product_stock(&mut store, "inv_1", "prod_4", "loc_3", 2);
        let stock = store.data().stock("inv_1", "prod_4").expect("created");
        assert_eq!(stock.stock_by_location.len(), 1);
        assert_eq!(stock.count("loc_3"), 2);
    }

    #[test]
    fn adjust_stock_refuses_to_go_negative() {
        let mut store = seeded_store();
        assert_eq!(adjust_product_stock(&mut store, "inv_1", "prod_1", "loc_3", -2), Some(0));
        assert_eq!(adjust_product_stock(&mut store, "inv_1", "prod_1", "loc_3", -1), None);
        assert_eq!(adjust_product_stock(&mut store, "inv_1", "prod_1", "loc_3", 5), Some(5));
        assert_eq!(store.data().stock("inv_1", "prod_1").expect("row").count("loc_3"), 5);
    }

    // ── ordering ──────────────────────────────────────────────────────────────

    #[test]
    fn reorder_accepts_permutation() {
        let mut store = seeded_store();
        let reversed: Vec<String> = ["prod_5", "prod_4", "prod_3", "prod_2", "prod_1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        update_inventory_product_order(&mut store, "inv_1", reversed.clone()).expect("reorder");
        assert_eq!(get_inventory(&store, "inv_1").expect("inv").product_ids, reversed);
    }

    #[test]
    fn reorder_rejects_non_permutations() {
        let mut store = seeded_store();
        let ids = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let dropped = update_inventory_product_order(&mut store, "inv_1", ids(&["prod_1", "prod_2"]));
        assert!(matches!(dropped, Err(AppError::InvalidReorder(_))));

        let duplicated = update_inventory_product_order(
            &mut store,
            "inv_1",
            ids(&["prod_1", "prod_1", "prod_3", "prod_4", "prod_5"]),
        );
        assert!(matches!(duplicated, Err(AppError::InvalidReorder(_))));

        let unknown = update_inventory_product_order(
            &mut store,
            "inv_1",
            ids(&["prod_1", "prod_2", "prod_3", "prod_4", "prod_9"]),
        );
        assert!(matches!(unknown, Err(AppError::InvalidReorder(_))));

        let missing = update_inventory_product_order(&mut store, "inv_404", vec![]);
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        assert_eq!(
            get_inventory(&store, "inv_1").expect("inv").product_ids,
            ids(&["prod_1", "prod_2", "prod_3", "prod_4", "prod_5"])
        );
    }

    #[test]
    fn move_product_swaps_neighbours() {
        let mut store = seeded_store();
        assert!(move_product(&mut store, "inv_1", "prod_2", MoveDirection::Up));
        assert!(!move_product(&mut store, "inv_1", "prod_2", MoveDirection::Up));
        assert!(move_product(&mut store, "inv_1", "prod_4", MoveDirection::Down));
        assert!(!move_product(&mut store, "inv_1", "prod_4", MoveDirection::Down));
        assert!(!move_product(&mut store, "inv_1", "prod_404", MoveDirection::Down));
        assert_eq!(
            get_inventory(&store, "inv_1").expect("inv").product_ids,
            ["prod_2", "prod_1", "prod_3", "prod_5", "prod_4"]
        );
    }

    // ── details ───────────────────────────────────────────────────────────────

    #[test]
    fn update_details_changes_fields_and_threshold() {
        let mut store = seeded_store();
        let updated = update_product_details(
            &mut store,
            "prod_1",
            details(
                "Lock Set",
                ImageInput::Icon {
                    icon_id: "lock".to_string(),
                },
            ),
            "inv_1",
        )
        .expect("updated");

        assert_eq!(updated.name, "Lock Set");
        assert_eq!(updated.code, "NEW-CODE");
        assert_eq!(updated.sale_price, None);
        assert_eq!(updated.image.representation(), ImageRef::Icon { icon_id: "lock" });
        let inv = get_inventory(&store, "inv_1").expect("inv");
        assert_eq!(critical_threshold(&inv, "prod_1"), 9);
        assert_eq!(store.data().products["prod_1"], updated);
    }

    #[test]
    fn update_details_keeps_image_when_input_is_inconsistent() {
        let mut store = seeded_store();
        let before = store.data().products["prod_2"].image.clone();
        let updated = update_product_details(
            &mut store,
            "prod_2",
            details(
                "Padlock",
                ImageInput::Upload {
                    uploaded_image: String::new(),
                },
            ),
            "inv_1",
        )
        .expect("updated");
        assert_eq!(updated.image, before);
    }

    #[test]
    fn update_details_requires_product_and_inventory() {
        let mut store = seeded_store();
        let input = || details("x", ImageInput::Icon { icon_id: "box".to_string() });
        assert!(update_product_details(&mut store, "prod_404", input(), "inv_1").is_none());
        assert!(update_product_details(&mut store, "prod_1", input(), "inv_404").is_none());
        assert_eq!(store.data().products["prod_1"].name, "Cylinder Lock Set");
    }

    // ── delete / sharing ──────────────────────────────────────────────────────

    #[test]
    fn delete_unlinks_but_keeps_catalog_entry() {
        let mut store = seeded_store();
        assert!(delete_product_from_inventory(&mut store, "inv_1", "prod_1"));

        let inv = get_inventory(&store, "inv_1").expect("inv");
        assert!(!inv.contains_product("prod_1"));
        assert!(!inv.critical_thresholds.contains_key("prod_1"));
        assert!(store.data().stock("inv_1", "prod_1").is_none());
        assert!(store.data().products.contains_key("prod_1"));
    }

    #[test]
    fn delete_from_missing_inventory_is_false() {
        let mut store = seeded_store();
        assert!(!delete_product_from_inventory(&mut store, "inv_404", "prod_1"));
    }

    #[test]
    fn shared_product_survives_one_inventory_deletion() {
        let mut store = seeded_store();
        let van = create_inventory(
            &mut store,
            "Van",
            "truck",
            &[NewLocation {
                name: "Rack".to_string(),
            }],
        );
        let rack = van.locations[0].id.clone();

        let entry = attach_product_to_inventory(
            &mut store,
            &van.id,
            "prod_1",
            1,
            &BTreeMap::from([(rack.clone(), 6)]),
        )
        .expect("attached");
        assert_eq!(entry.stock.count(&rack), 6);

        // Attaching twice changes nothing.
        let again =
            attach_product_to_inventory(&mut store, &van.id, "prod_1", 99, &BTreeMap::new())
                .expect("already attached");
        assert_eq!(again.stock.count(&rack), 6);
        assert_eq!(critical_threshold(&again.inventory, "prod_1"), 1);

        delete_inventory(&mut store, "inv_1").expect("deleted");
        let still = get_product_with_stock(&store, &van.id, "prod_1").expect("still linked");
        assert_eq!(still.stock.count(&rack), 6);
        assert!(list_catalog(&store).iter().any(|p| p.id == "prod_2"));
    }
}
