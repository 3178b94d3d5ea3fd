//! Sample dataset written on first launch and after a schema reset.

use std::collections::BTreeMap;

use crate::catalog;
use crate::models::{stock_key, AppData, Inventory, Location, Product, ProductImage, ProductStock};

pub const SEED_INVENTORY_ID: &str = "inv_1";

fn seed_image(placeholder_id: &str) -> ProductImage {
    let img = catalog::placeholder_image(placeholder_id).unwrap_or_else(catalog::fallback_placeholder);
    ProductImage::from_placeholder(img)
}

/// Build the seed dataset: one inventory, three locations, five products.
pub fn seed_data() -> AppData {
    let locations = vec![
        Location {
            id: "loc_1".to_string(),
            name: "Warehouse".to_string(),
        },
        Location {
            id: "loc_2".to_string(),
            name: "Shop".to_string(),
        },
        Location {
            id: "loc_3".to_string(),
            name: "Vehicle".to_string(),
        },
    ];

    // (id, name, code, placeholder, purchase, sale, threshold, [loc_1, loc_2, loc_3])
    let rows: [(&str, &str, &str, &str, f64, f64, u32, [u32; 3]); 5] = [
        ("prod_1", "Cylinder Lock Set", "KLT-BRL-01", "cylinder-lock", 150.0, 250.0, 5, [10, 4, 2]),
        ("prod_2", "Padlock (Medium)", "KLT-ASM-02", "padlock", 75.0, 120.0, 10, [25, 15, 8]),
        ("prod_3", "Smart Lock System", "KLT-AKL-03", "smart-lock", 1200.0, 1800.0, 2, [3, 1, 1]),
        ("prod_4", "Steel Door Handle", "AK-KPK-04", "door-handle", 200.0, 350.0, 8, [15, 12, 3]),
        ("prod_5", "Blank Key Pack (100 pcs)", "ANH-HAM-05", "key-bunch", 80.0, 150.0, 3, [5, 2, 4]),
    ];

    let mut data = AppData::default();
    let mut inventory = Inventory {
        id: SEED_INVENTORY_ID.to_string(),
        name: "Main Inventory".to_string(),
        icon_id: "warehouse".to_string(),
        locations: locations.clone(),
        product_ids: Vec::new(),
        critical_thresholds: BTreeMap::new(),
    };

    for (id, name, code, placeholder, purchase, sale, threshold, counts) in rows {
        data.products.insert(
            id.to_string(),
            Product {
                id: id.to_string(),
                name: name.to_string(),
                code: code.to_string(),
                image: seed_image(placeholder),
                purchase_price: purchase,
                sale_price: Some(sale),
            },
        );
        inventory.product_ids.push(id.to_string());
        inventory
            .critical_thresholds
            .insert(id.to_string(), threshold);

        let stock_by_location = locations
            .iter()
            .zip(counts)
            .map(|(loc, n)| (loc.id.clone(), n))
            .collect();
        data.product_stocks.insert(
            stock_key(SEED_INVENTORY_ID, id),
            ProductStock {
                product_id: id.to_string(),
                inventory_id: SEED_INVENTORY_ID.to_string(),
                stock_by_location,
            },
        );
    }

    data.inventories
        .insert(SEED_INVENTORY_ID.to_string(), inventory);
    data
}
