//! Stock level and order list commands.
//!
//! The low-stock margin comes from
//! [`AppState::near_margin`](crate::state::AppState::near_margin); the
//! render language from the stored settings.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::AppError;
use crate::orders::{self, OrderList, StockStatus};
use crate::settings::load_settings;
use crate::state::read_store;
#[cfg(feature = "desktop")]
use crate::state::AppState;
use crate::storage::Store;

use super::inventories::not_found_inventory;

pub fn stock_report_inner(
    inventory_id: &str,
    near_margin: u32,
    lock: &RwLock<Store>,
) -> Result<Vec<StockStatus>, AppError> {
    let store = read_store(lock)?;
    if !store.data().inventories.contains_key(inventory_id) {
        return Err(not_found_inventory(inventory_id));
    }
    Ok(orders::stock_report(&store, inventory_id, near_margin))
}

pub fn suggest_order_inner(
    inventory_id: &str,
    near_margin: u32,
    lock: &RwLock<Store>,
) -> Result<BTreeMap<String, u32>, AppError> {
    let store = read_store(lock)?;
    if !store.data().inventories.contains_key(inventory_id) {
        return Err(not_found_inventory(inventory_id));
    }
    Ok(orders::suggest_order_quantities(&store, inventory_id, near_margin))
}

pub fn build_order_list_inner(
    inventory_id: &str,
    quantities: &BTreeMap<String, u32>,
    lock: &RwLock<Store>,
) -> Result<OrderList, AppError> {
    orders::build_order_list(&*read_store(lock)?, inventory_id, quantities)
        .ok_or_else(|| not_found_inventory(inventory_id))
}

/// Text of the order list in the stored language, or `None` if nothing is ordered.
pub fn render_order_list_inner(
    inventory_id: &str,
    quantities: &BTreeMap<String, u32>,
    date: NaiveDate,
    lock: &RwLock<Store>,
) -> Result<Option<String>, AppError> {
    let store = read_store(lock)?;
    let language = load_settings(&store).language;
    let order = orders::build_order_list(&store, inventory_id, quantities)
        .ok_or_else(|| not_found_inventory(inventory_id))?;
    Ok(order.render(language, date))
}

// ── Tauri commands ────────────────────────────────────────────────────────────

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn stock_report(
    inventory_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<Vec<StockStatus>, AppError> {
    stock_report_inner(&inventory_id, state.near_margin, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn suggest_order(
    inventory_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<BTreeMap<String, u32>, AppError> {
    suggest_order_inner(&inventory_id, state.near_margin, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn build_order_list(
    inventory_id: String,
    quantities: BTreeMap<String, u32>,
    state: tauri::State<'_, AppState>,
) -> Result<OrderList, AppError> {
    build_order_list_inner(&inventory_id, &quantities, &state.store)
}

/// Render the order list dated today (local time).
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn render_order_list(
    inventory_id: String,
    quantities: BTreeMap<String, u32>,
    state: tauri::State<'_, AppState>,
) -> Result<Option<String>, AppError> {
    let today = chrono::Local::now().date_naive();
    render_order_list_inner(&inventory_id, &quantities, today, &state.store)
}
