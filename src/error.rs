//! Application-level error type for the storage medium, decoding, config and
//! command boundaries.
//!
//! Repository lookups signal absence with `Option` or empty collections; an
//! `AppError` only appears where something actually failed. It is serialized
//! to `{ kind, message }` JSON payloads so the frontend can pattern-match on
//! a stable `kind` string.

/// Top-level error returned by fallible store and command operations.
///
/// Serialized with serde's adjacently-tagged representation:
/// `{ "kind": "<variant>", "message": "<human-readable text>" }`
///
/// The TypeScript counterpart is:
/// ```ts
/// type AppError = { kind: string; message: string };
/// ```
#[derive(Debug, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum AppError {
    /// The storage medium refused a read or write.
    #[error("{0}")]
    Storage(String),

    /// The persisted blob could not be encoded or decoded as JSON.
    #[error("{0}")]
    Serialization(String),

    /// The persisted blob does not match any known schema version.
    #[error("{0}")]
    Schema(String),

    /// The configuration file could not be read or parsed.
    #[error("{0}")]
    Config(String),

    /// A requested inventory, product or location was not found.
    #[error("{0}")]
    NotFound(String),

    /// A product reorder list is not a permutation of the current order.
    #[error("{0}")]
    InvalidReorder(String),

    /// Input rejected before it reached the store (e.g. too many locations).
    #[error("{0}")]
    InvalidInput(String),

    /// The shared store lock was poisoned by a panicking writer.
    #[error("{0}")]
    Lock(String),

    /// A generic I/O error; the inner [`std::io::Error`] is converted to a
    /// string at the system boundary so it remains serializable.
    #[error("{0}")]
    Io(String),
}

impl From<std::io::Error> for AppError {
    /// Convert an [`std::io::Error`] into an [`AppError::Io`].
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    /// Convert a [`serde_json::Error`] into an [`AppError::Serialization`].
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
