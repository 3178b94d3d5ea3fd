//! The root aggregate persisted as one JSON blob.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{stock_key, Inventory, Product, ProductStock};

/// Every inventory, catalog product and stock row.
///
/// Mutations always rewrite the whole aggregate; see [`crate::storage::Store`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub inventories: BTreeMap<String, Inventory>,
    pub products: BTreeMap<String, Product>,
    /// Keyed by [`stock_key`].
    #[serde(default)]
    pub product_stocks: BTreeMap<String, ProductStock>,
}

impl AppData {
    pub fn stock(&self, inventory_id: &str, product_id: &str) -> Option<&ProductStock> {
        self.product_stocks.get(&stock_key(inventory_id, product_id))
    }

    /// Stock row for the pair, or an empty default when none is stored.
    pub fn stock_or_empty(&self, inventory_id: &str, product_id: &str) -> ProductStock {
        self.stock(inventory_id, product_id)
            .cloned()
            .unwrap_or_else(|| ProductStock::empty(inventory_id, product_id))
    }

    /// Stock row for the pair, inserting an empty one if needed.
    pub fn stock_entry(&mut self, inventory_id: &str, product_id: &str) -> &mut ProductStock {
        self.product_stocks
            .entry(stock_key(inventory_id, product_id))
            .or_insert_with(|| ProductStock::empty(inventory_id, product_id))
    }
}
