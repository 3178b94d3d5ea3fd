//! Serializable envelope stored under [`super::APP_DATA_KEY`].
//!
//! The envelope is the **on-disk** representation: the [`AppData`] maps
//! flattened next to a schema tag. The **in-memory** representation is plain
//! [`AppData`]; conversion between the two is done in
//! [`super::serialization`].

use serde::{Deserialize, Serialize};

use crate::models::AppData;

/// Top-level JSON object of the persisted blob.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAppData {
    /// Format version; see [`super::serialization::CURRENT_SCHEMA_VERSION`].
    pub schema_version: u32,
    /// StockPilot version that last wrote this blob (`CARGO_PKG_VERSION`).
    #[serde(default)]
    pub app_version: String,
    /// RFC 3339 timestamp (UTC) of the last write.
    #[serde(default)]
    pub saved_at: String,
    #[serde(flatten)]
    pub data: AppData,
}

/// Borrowing twin of [`StoredAppData`] used when writing, so a save does not
/// clone the aggregate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAppDataRef<'a> {
    pub schema_version: u32,
    pub app_version: &'a str,
    pub saved_at: String,
    #[serde(flatten)]
    pub data: &'a AppData,
}
