//! Per-inventory, per-location stock counts.
//!
//! A [`ProductStock`] is the junction between one inventory and one product,
//! stored in [`super::AppData::product_stocks`] under [`stock_key`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Location;

/// Composite map key for the `(inventory_id, product_id)` stock row.
pub fn stock_key(inventory_id: &str, product_id: &str) -> String {
    format!("{inventory_id}_{product_id}")
}

/// Stock counts of one product within one inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStock {
    pub product_id: String,
    pub inventory_id: String,
    /// `location_id -> count`. A missing location counts as zero.
    #[serde(default)]
    pub stock_by_location: BTreeMap<String, u32>,
}

impl ProductStock {
    /// An all-zero stock row.
    pub fn empty(inventory_id: &str, product_id: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            inventory_id: inventory_id.to_string(),
            stock_by_location: BTreeMap::new(),
        }
    }

    pub fn count(&self, location_id: &str) -> u32 {
        self.stock_by_location.get(location_id).copied().unwrap_or(0)
    }
}

/// Sum of the counts at `locations`; an absent row counts as all zero.
///
/// Counts stored for locations not in `locations` are ignored.
pub fn total_stock(stock: Option<&ProductStock>, locations: &[Location]) -> u64 {
    let Some(stock) = stock else {
        return 0;
    };
    locations
        .iter()
        .map(|loc| u64::from(stock.count(&loc.id)))
        .sum()
}
