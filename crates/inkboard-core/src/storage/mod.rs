//! Document snapshots and storage backends.
//!
//! The scene itself never performs I/O; a storage backend saves what
//! [`Scene::snapshot`](crate::Scene::snapshot) returns and feeds loaded
//! snapshots back through [`Scene::hydrate`](crate::Scene::hydrate).

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::element::{Background, Element};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistent form of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    /// Elements back to front.
    pub elements: Vec<Element>,
    pub canvas_width: f64,
    pub canvas_height: f64,
    #[serde(default)]
    pub background_color: Background,
}

impl DocumentSnapshot {
    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Trait for document storage backends.
///
/// Calls are synchronous, like the rest of the core.
pub trait Storage: Send + Sync {
    /// Save a document.
    fn save(&self, id: &str, document: &DocumentSnapshot) -> StorageResult<()>;

    /// Load a document.
    fn load(&self, id: &str) -> StorageResult<DocumentSnapshot>;

    /// Delete a document.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all document IDs.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a document exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;
}
