//! Stock levels and shareable order lists.
//!
//! A product is *critical* when its total stock is at or below the
//! inventory's threshold for it, and *low* when it is within `near_margin`
//! above that. Order lists are built from per-product quantities and rendered
//! as plain text for sharing with a supplier.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::total_stock;
use crate::repository::products::{critical_threshold, list_products_with_stock};
use crate::settings::Language;
use crate::storage::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Critical,
    Low,
    Healthy,
}

pub fn stock_level(total: u64, threshold: u32, near_margin: u32) -> StockLevel {
    let threshold = u64::from(threshold);
    if total <= threshold {
        StockLevel::Critical
    } else if total <= threshold + u64::from(near_margin) {
        StockLevel::Low
    } else {
        StockLevel::Healthy
    }
}

/// Stock summary of one product in an inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStatus {
    pub product_id: String,
    pub total: u64,
    pub threshold: u32,
    pub level: StockLevel,
}

/// Level of every product in an inventory, in display order.
pub fn stock_report(store: &Store, inventory_id: &str, near_margin: u32) -> Vec<StockStatus> {
    let Some(inventory) = store.data().inventories.get(inventory_id) else {
        return Vec::new();
    };
    list_products_with_stock(store, inventory_id)
        .into_iter()
        .map(|item| {
            let total = total_stock(Some(&item.stock), &inventory.locations);
            let threshold = critical_threshold(inventory, &item.product.id);
            StockStatus {
                level: stock_level(total, threshold, near_margin),
                product_id: item.product.id,
                total,
                threshold,
            }
        })
        .collect()
}

/// Quantities that lift every critical or low product just above
/// `threshold + near_margin`. Healthy products are left out.
pub fn suggest_order_quantities(
    store: &Store,
    inventory_id: &str,
    near_margin: u32,
) -> BTreeMap<String, u32> {
    stock_report(store, inventory_id, near_margin)
        .into_iter()
        .filter(|s| s.level != StockLevel::Healthy)
        .map(|s| {
            let target = u64::from(s.threshold) + u64::from(near_margin) + 1;
            let qty = u32::try_from(target.saturating_sub(s.total)).unwrap_or(u32::MAX);
            (s.product_id, qty)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub code: String,
    pub name: String,
    pub current_stock: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderList {
    pub inventory_id: String,
    pub lines: Vec<OrderLine>,
}

/// Collect order lines in the inventory's display order.
///
/// Products with no quantity (or zero) are skipped. `None` if the inventory
/// does not exist.
pub fn build_order_list(
    store: &Store,
    inventory_id: &str,
    quantities: &BTreeMap<String, u32>,
) -> Option<OrderList> {
    let inventory = store.data().inventories.get(inventory_id)?;
    let lines = list_products_with_stock(store, inventory_id)
        .into_iter()
        .filter_map(|item| {
            let quantity = quantities.get(&item.product.id).copied().filter(|q| *q > 0)?;
            Some(OrderLine {
                current_stock: total_stock(Some(&item.stock), &inventory.locations),
                product_id: item.product.id,
                code: item.product.code,
                name: item.product.name,
                quantity,
            })
        })
        .collect();

    Some(OrderList {
        inventory_id: inventory_id.to_string(),
        lines,
    })
}

impl OrderList {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Shareable text form, or `None` when there is nothing to order.
    pub fn render(&self, language: Language, date: NaiveDate) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let (title, unit, created, date_fmt) = match language {
            Language::Tr => ("Sipariş Listesi:", "adet", "Oluşturulma Tarihi", "%d.%m.%Y"),
            Language::En => ("Order List:", "pcs", "Created", "%-m/%-d/%Y"),
        };

        let mut text = format!("{title}\n-----------------\n");
        for line in &self.lines {
            text.push_str(&format!(
                "({}) {}: {} {unit}\n",
                line.code, line.name, line.quantity
            ));
        }
        text.push_str(&format!("\n{created}: {}", date.format(date_fmt)));
        Some(text)
    }
}
