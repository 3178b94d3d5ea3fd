//! StockPilot data layer: inventories, locations, a product catalog and
//! per-location stock counts, persisted as one versioned JSON aggregate.
//!
//! Embedders open a [`Store`] (or an [`AppState`] for shared access) from a
//! [`Config`] and drive it through the [`repository`] functions, or through
//! the validating [`commands`] layer. With the `desktop` feature the same
//! commands are exposed to a Tauri frontend by `commands::plugin`.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod logging;
pub mod models;
pub mod orders;
pub mod repository;
pub mod settings;
pub mod state;
pub mod storage;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;
pub use storage::{FileStore, LoadOutcome, Store};

/// Open the file-backed store in `config.data_dir`.
pub fn open_store(config: &Config) -> Result<Store, AppError> {
    let medium = FileStore::open(&config.data_dir)?;
    let store = Store::open(medium);
    tracing::info!(
        data_dir = %config.data_dir.display(),
        outcome = ?store.load_outcome(),
        "StockPilot store opened"
    );
    Ok(store)
}

/// [`open_store`] wrapped for concurrent access.
pub fn open_state(config: &Config) -> Result<AppState, AppError> {
    let store = open_store(config)?;
    Ok(AppState::new(store).with_near_margin(config.near_margin))
}
