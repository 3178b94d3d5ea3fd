//! Inventory IPC command handlers.
//!
//! All handlers follow the `_inner` + `#[tauri::command]` wrapper pattern:
//! - `_inner` functions take `&RwLock<Store>` and contain the validation.
//!   They are synchronous and directly testable without Tauri.
//! - `#[tauri::command]` wrappers (feature `desktop`) extract managed state
//!   and delegate to `_inner`.

use std::sync::RwLock;

use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Inventory, InventoryUpdate, NewLocation, MAX_LOCATIONS};
use crate::repository::inventories;
use crate::state::{read_store, write_store};
#[cfg(feature = "desktop")]
use crate::state::AppState;
use crate::storage::Store;

/// Fields required to create an inventory.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryInput {
    pub name: String,
    pub icon_id: String,
    pub locations: Vec<NewLocation>,
}

fn validate(name: &str, location_count: usize) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidInput("inventory name is empty".to_string()));
    }
    if !(1..=MAX_LOCATIONS).contains(&location_count) {
        return Err(AppError::InvalidInput(format!(
            "an inventory needs 1 to {MAX_LOCATIONS} locations, got {location_count}"
        )));
    }
    Ok(())
}

pub(crate) fn not_found_inventory(id: &str) -> AppError {
    AppError::NotFound(format!("inventory {id} not found"))
}

// ── Inner logic ───────────────────────────────────────────────────────────────

pub fn list_inventories_inner(lock: &RwLock<Store>) -> Result<Vec<Inventory>, AppError> {
    Ok(inventories::list_inventories(&*read_store(lock)?))
}

pub fn get_inventory_inner(id: &str, lock: &RwLock<Store>) -> Result<Inventory, AppError> {
    inventories::get_inventory(&*read_store(lock)?, id).ok_or_else(|| not_found_inventory(id))
}

pub fn create_inventory_inner(
    input: InventoryInput,
    lock: &RwLock<Store>,
) -> Result<Inventory, AppError> {
    validate(&input.name, input.locations.len())?;
    let mut store = write_store(lock)?;
    Ok(inventories::create_inventory(
        &mut store,
        input.name.trim(),
        &input.icon_id,
        &input.locations,
    ))
}

pub fn update_inventory_inner(
    id: &str,
    update: InventoryUpdate,
    lock: &RwLock<Store>,
) -> Result<Inventory, AppError> {
    validate(&update.name, update.locations.len())?;
    let mut store = write_store(lock)?;
    inventories::update_inventory(&mut store, id, update).ok_or_else(|| not_found_inventory(id))
}

pub fn delete_inventory_inner(id: &str, lock: &RwLock<Store>) -> Result<(), AppError> {
    let mut store = write_store(lock)?;
    inventories::delete_inventory(&mut store, id)
        .map(|_| ())
        .ok_or_else(|| not_found_inventory(id))
}

// ── Tauri commands ────────────────────────────────────────────────────────────

/// Return every inventory, ordered by id.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn list_inventories(
    state: tauri::State<'_, AppState>,
) -> Result<Vec<Inventory>, AppError> {
    list_inventories_inner(&state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_inventory(
    id: String,
    state: tauri::State<'_, AppState>,
) -> Result<Inventory, AppError> {
    get_inventory_inner(&id, &state.store)
}

/// Create an inventory; ids for it and its locations are generated here.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn create_inventory(
    input: InventoryInput,
    state: tauri::State<'_, AppState>,
) -> Result<Inventory, AppError> {
    create_inventory_inner(input, &state.store)
}

/// Rename an inventory and replace its locations.
///
/// Locations missing from `update` are deleted together with their counts.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn update_inventory(
    id: String,
    update: InventoryUpdate,
    state: tauri::State<'_, AppState>,
) -> Result<Inventory, AppError> {
    update_inventory_inner(&id, update, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn delete_inventory(id: String, state: tauri::State<'_, AppState>) -> Result<(), AppError> {
    delete_inventory_inner(&id, &state.store)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
