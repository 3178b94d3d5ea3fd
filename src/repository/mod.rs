//! Data-access operations over a [`Store`](crate::storage::Store).
//!
//! Functions are grouped by aggregate:
//! - [`inventories`]: inventory and location CRUD with stock cleanup
//! - [`products`]: catalog products and per-inventory stock, thresholds
//!   and display order
//!
//! Every function takes the store explicitly. Lookups signal absence with
//! `Option` or an empty `Vec`; each mutation that finds its target writes the
//! whole aggregate back exactly once.

pub mod inventories;
pub mod products;
