//! Product and stock IPC command handlers (`_inner` + `#[tauri::command]`).

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::AppError;
use crate::models::{NewProduct, Product, ProductDetails};
use crate::repository::products::{self, MoveDirection, ProductEntry, ProductWithStock};
use crate::state::{read_store, write_store};
#[cfg(feature = "desktop")]
use crate::state::AppState;
use crate::storage::Store;

use super::inventories::not_found_inventory;

fn not_found_product(inventory_id: &str, product_id: &str) -> AppError {
    AppError::NotFound(format!(
        "product {product_id} not found in inventory {inventory_id}"
    ))
}

fn require_inventory(store: &Store, inventory_id: &str) -> Result<(), AppError> {
    if store.data().inventories.contains_key(inventory_id) {
        Ok(())
    } else {
        Err(not_found_inventory(inventory_id))
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

pub fn list_catalog_inner(lock: &RwLock<Store>) -> Result<Vec<Product>, AppError> {
    Ok(products::list_catalog(&*read_store(lock)?))
}

pub fn list_products_with_stock_inner(
    inventory_id: &str,
    lock: &RwLock<Store>,
) -> Result<Vec<ProductWithStock>, AppError> {
    let store = read_store(lock)?;
    require_inventory(&store, inventory_id)?;
    Ok(products::list_products_with_stock(&store, inventory_id))
}

pub fn get_product_with_stock_inner(
    inventory_id: &str,
    product_id: &str,
    lock: &RwLock<Store>,
) -> Result<ProductEntry, AppError> {
    let store = read_store(lock)?;
    products::get_product_with_stock(&store, inventory_id, product_id)
        .ok_or_else(|| not_found_product(inventory_id, product_id))
}

// ── Mutations ─────────────────────────────────────────────────────────────────

pub fn add_product_to_inventory_inner(
    inventory_id: &str,
    values: NewProduct,
    lock: &RwLock<Store>,
) -> Result<ProductEntry, AppError> {
    if values.name.trim().is_empty() {
        return Err(AppError::InvalidInput("product name is empty".to_string()));
    }
    let mut store = write_store(lock)?;
    products::add_product_to_inventory(&mut store, inventory_id, values)
        .ok_or_else(|| not_found_inventory(inventory_id))
}

pub fn attach_product_to_inventory_inner(
    inventory_id: &str,
    product_id: &str,
    critical_threshold: u32,
    initial_stocks: &BTreeMap<String, u32>,
    lock: &RwLock<Store>,
) -> Result<ProductEntry, AppError> {
    let mut store = write_store(lock)?;
    products::attach_product_to_inventory(
        &mut store,
        inventory_id,
        product_id,
        critical_threshold,
        initial_stocks,
    )
    .ok_or_else(|| not_found_product(inventory_id, product_id))
}

pub fn update_product_stock_inner(
    inventory_id: &str,
    product_id: &str,
    location_id: &str,
    new_count: u32,
    lock: &RwLock<Store>,
) -> Result<(), AppError> {
    let mut store = write_store(lock)?;
    require_inventory(&store, inventory_id)?;
    products::update_product_stock(&mut store, inventory_id, product_id, location_id, new_count);
    Ok(())
}

pub fn adjust_product_stock_inner(
    inventory_id: &str,
    product_id: &str,
    location_id: &str,
    delta: i64,
    lock: &RwLock<Store>,
) -> Result<u32, AppError> {
    let mut store = write_store(lock)?;
    require_inventory(&store, inventory_id)?;
    products::adjust_product_stock(&mut store, inventory_id, product_id, location_id, delta)
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "adjusting {product_id} at {location_id} by {delta} leaves an invalid count"
            ))
        })
}

pub fn update_inventory_product_order_inner(
    inventory_id: &str,
    ordered_product_ids: Vec<String>,
    lock: &RwLock<Store>,
) -> Result<(), AppError> {
    let mut store = write_store(lock)?;
    products::update_inventory_product_order(&mut store, inventory_id, ordered_product_ids)
}

pub fn move_product_inner(
    inventory_id: &str,
    product_id: &str,
    direction: MoveDirection,
    lock: &RwLock<Store>,
) -> Result<bool, AppError> {
    let mut store = write_store(lock)?;
    Ok(products::move_product(&mut store, inventory_id, product_id, direction))
}

pub fn update_product_details_inner(
    product_id: &str,
    details: ProductDetails,
    inventory_id: &str,
    lock: &RwLock<Store>,
) -> Result<Product, AppError> {
    if details.name.trim().is_empty() {
        return Err(AppError::InvalidInput("product name is empty".to_string()));
    }
    let mut store = write_store(lock)?;
    products::update_product_details(&mut store, product_id, details, inventory_id)
        .ok_or_else(|| not_found_product(inventory_id, product_id))
}

pub fn delete_product_from_inventory_inner(
    inventory_id: &str,
    product_id: &str,
    lock: &RwLock<Store>,
) -> Result<(), AppError> {
    let mut store = write_store(lock)?;
    if products::delete_product_from_inventory(&mut store, inventory_id, product_id) {
        Ok(())
    } else {
        Err(not_found_inventory(inventory_id))
    }
}

// ── Tauri commands ────────────────────────────────────────────────────────────

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn list_catalog(state: tauri::State<'_, AppState>) -> Result<Vec<Product>, AppError> {
    list_catalog_inner(&state.store)
}

/// Products of an inventory in display order, with stock rows.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn list_products_with_stock(
    inventory_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<Vec<ProductWithStock>, AppError> {
    list_products_with_stock_inner(&inventory_id, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_product_with_stock(
    inventory_id: String,
    product_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<ProductEntry, AppError> {
    get_product_with_stock_inner(&inventory_id, &product_id, &state.store)
}

/// Create a catalog product and place it first in the inventory.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn add_product_to_inventory(
    inventory_id: String,
    values: NewProduct,
    state: tauri::State<'_, AppState>,
) -> Result<ProductEntry, AppError> {
    add_product_to_inventory_inner(&inventory_id, values, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn attach_product_to_inventory(
    inventory_id: String,
    product_id: String,
    critical_threshold: u32,
    initial_stocks: BTreeMap<String, u32>,
    state: tauri::State<'_, AppState>,
) -> Result<ProductEntry, AppError> {
    attach_product_to_inventory_inner(
        &inventory_id,
        &product_id,
        critical_threshold,
        &initial_stocks,
        &state.store,
    )
}

/// Overwrite the count at one location.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn update_product_stock(
    inventory_id: String,
    product_id: String,
    location_id: String,
    new_count: u32,
    state: tauri::State<'_, AppState>,
) -> Result<(), AppError> {
    update_product_stock_inner(&inventory_id, &product_id, &location_id, new_count, &state.store)
}

/// Add `delta` (possibly negative) to the count at one location.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn adjust_product_stock(
    inventory_id: String,
    product_id: String,
    location_id: String,
    delta: i64,
    state: tauri::State<'_, AppState>,
) -> Result<u32, AppError> {
    adjust_product_stock_inner(&inventory_id, &product_id, &location_id, delta, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn update_inventory_product_order(
    inventory_id: String,
    ordered_product_ids: Vec<String>,
    state: tauri::State<'_, AppState>,
) -> Result<(), AppError> {
    update_inventory_product_order_inner(&inventory_id, ordered_product_ids, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn move_product(
    inventory_id: String,
    product_id: String,
    direction: MoveDirection,
    state: tauri::State<'_, AppState>,
) -> Result<bool, AppError> {
    move_product_inner(&inventory_id, &product_id, direction, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn update_product_details(
    product_id: String,
    details: ProductDetails,
    inventory_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<Product, AppError> {
    update_product_details_inner(&product_id, details, &inventory_id, &state.store)
}

/// Unlink a product from an inventory; the catalog entry is kept.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn delete_product_from_inventory(
    inventory_id: String,
    product_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<(), AppError> {
    delete_product_from_inventory_inner(&inventory_id, &product_id, &state.store)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageInput;
    use crate::storage::test_support::seeded_store;

    fn lock() -> RwLock<Store> {
        RwLock::new(seeded_store())
    }

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            code: "NP-01".to_string(),
            critical_threshold: 1,
            purchase_price: 10.0,
            sale_price: None,
            image: ImageInput::Icon {
                icon_id: "package".to_string(),
            },
            initial_stocks: BTreeMap::from([("loc_2".to_string(), 4)]),
        }
    }

    #[test]
    fn add_then_list_puts_new_product_first() {
        let lock = lock();
        let entry = add_product_to_inventory_inner("inv_1", new_product("Hinge"), &lock)
            .expect("add");
        let listed = list_products_with_stock_inner("inv_1", &lock).expect("list");
        assert_eq!(listed[0].product.id, entry.product.id);
        assert_eq!(listed[0].stock.count("loc_2"), 4);
        assert_eq!(list_catalog_inner(&lock).expect("catalog").len(), 6);
    }

    #[test]
    fn missing_inventory_is_not_found() {
        let lock = lock();
        assert!(matches!(
            list_products_with_stock_inner("inv_404", &lock),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            add_product_to_inventory_inner("inv_404", new_product("Hinge"), &lock),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            get_product_with_stock_inner("inv_1", "prod_404", &lock),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_product_from_inventory_inner("inv_404", "prod_1", &lock),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        let lock = lock();
        assert!(matches!(
            add_product_to_inventory_inner("inv_1", new_product("   "), &lock),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn stock_updates_and_adjustments() {
        let lock = lock();
        update_product_stock_inner("inv_1", "prod_1", "loc_1", 3, &lock).expect("set");
        assert_eq!(
            adjust_product_stock_inner("inv_1", "prod_1", "loc_1", -2, &lock).expect("adjust"),
            1
        );
        assert!(matches!(
            adjust_product_stock_inner("inv_1", "prod_1", "loc_1", -5, &lock),
            Err(AppError::InvalidInput(_))
        ));
        let entry = get_product_with_stock_inner("inv_1", "prod_1", &lock).expect("get");
        assert_eq!(entry.stock.count("loc_1"), 1);
    }

    #[test]
    fn stock_writes_to_missing_inventory_leave_no_row() {
        let lock = lock();
        assert!(matches!(
            update_product_stock_inner("inv_404", "prod_1", "loc_1", 3, &lock),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            adjust_product_stock_inner("inv_404", "prod_1", "loc_1", 1, &lock),
            Err(AppError::NotFound(_))
        ));
        let store = read_store(&lock).expect("read");
        assert!(store.data().stock("inv_404", "prod_1").is_none());
    }

    #[test]
    fn reorder_errors_pass_through() {
        let lock = lock();
        assert!(matches!(
            update_inventory_product_order_inner("inv_1", vec!["prod_1".to_string()], &lock),
            Err(AppError::InvalidReorder(_))
        ));
        assert!(move_product_inner("inv_1", "prod_2", MoveDirection::Up, &lock).expect("move"));
        let ids: Vec<String> = list_products_with_stock_inner("inv_1", &lock)
            .expect("list")
            .into_iter()
            .map(|p| p.product.id)
            .collect();
        assert_eq!(ids[..2], ["prod_2".to_string(), "prod_1".to_string()]);
    }

    #[test]
    fn attach_and_detach_keep_catalog_entry() {
        let lock = lock();
        let van = {
            let mut store = write_store(&lock).expect("write");
            crate::repository::inventories::create_inventory(
                &mut store,
                "Van",
                "truck",
                &[crate::models::NewLocation {
                    name: "Back".to_string(),
                }],
            )
        };
        attach_product_to_inventory_inner("inv_1", "prod_3", 2, &BTreeMap::new(), &lock)
            .expect("already linked");
        let entry =
            attach_product_to_inventory_inner(&van.id, "prod_3", 1, &BTreeMap::new(), &lock)
                .expect("attach");
        assert_eq!(entry.inventory.product_ids, ["prod_3"]);

        delete_product_from_inventory_inner("inv_1", "prod_3", &lock).expect("detach");
        assert!(list_catalog_inner(&lock)
            .expect("catalog")
            .iter()
            .any(|p| p.id == "prod_3"));
        let details = ProductDetails {
            name: "Smart Lock v2".to_string(),
            code: "KLT-AKL-03".to_string(),
            critical_threshold: 4,
            purchase_price: 1100.0,
            sale_price: Some(1700.0),
            image: ImageInput::Icon {
                icon_id: "no-such-icon".to_string(),
            },
        };
        let updated =
            update_product_details_inner("prod_3", details, &van.id, &lock).expect("update");
        assert_eq!(updated.name, "Smart Lock v2");
        assert!(!updated.image.image_url.is_empty());
    }
}
