//! Identifier synthesis for new inventories, locations and products.
//!
//! Ids are a short type prefix plus a UUIDv7, which embeds a millisecond
//! timestamp ahead of its random bits, so ids minted later sort later.

use uuid::Uuid;

fn prefixed(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::now_v7().simple())
}

pub fn inventory_id() -> String {
    prefixed("inv")
}

pub fn location_id() -> String {
    prefixed("loc")
}

pub fn product_id() -> String {
    prefixed("prod")
}
