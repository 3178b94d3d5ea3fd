//! Application state shared between command handlers.
//!
//! [`AppState`] is registered with the Tauri plugin (see `commands::plugin`)
//! and accessed from command handlers via `tauri::State<AppState>`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::DEFAULT_NEAR_MARGIN;
use crate::error::AppError;
use crate::storage::Store;

/// Root application state.
///
/// The store is wrapped in an [`RwLock`] so that concurrent read commands
/// (listing inventories, fetching a product) do not block each other.
#[derive(Debug)]
pub struct AppState {
    pub store: RwLock<Store>,
    /// Margin above the critical threshold reported as low stock.
    pub near_margin: u32,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: RwLock::new(store),
            near_margin: DEFAULT_NEAR_MARGIN,
        }
    }

    pub fn with_near_margin(mut self, near_margin: u32) -> Self {
        self.near_margin = near_margin;
        self
    }
}

/// Acquire a read lock, mapping poisoning to [`AppError::Lock`].
pub fn read_store(lock: &RwLock<Store>) -> Result<RwLockReadGuard<'_, Store>, AppError> {
    lock.read()
        .map_err(|e| AppError::Lock(format!("store lock poisoned: {e}")))
}

/// Acquire a write lock, mapping poisoning to [`AppError::Lock`].
pub fn write_store(lock: &RwLock<Store>) -> Result<RwLockWriteGuard<'_, Store>, AppError> {
    lock.write()
        .map_err(|e| AppError::Lock(format!("store lock poisoned: {e}")))
}
