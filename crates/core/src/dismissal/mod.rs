//! Per-page dismissal state.
//!
//! A dismissal record says "the user hid the widget on this path". Records
//! are keyed by a fixed prefix plus the page path, so query-string variants
//! of the same page share state.

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DismissalConfig;

/// Errors from the key-value surface.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A previous holder of the store lock panicked.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Scoped durable key-value surface provided by the host.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Build the configured store: SQLite when a database path is set,
/// in-memory otherwise.
pub fn open_store(config: &DismissalConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    match &config.database {
        Some(path) => Ok(Arc::new(SqliteKvStore::new(path)?)),
        None => Ok(Arc::new(MemoryKvStore::new())),
    }
}

const DISMISSED: &str = "true";

/// Dismissal records on top of a [`KeyValueStore`].
#[derive(Clone)]
pub struct DismissalStore {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl DismissalStore {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn from_config(
        store: Arc<dyn KeyValueStore>,
        config: &DismissalConfig,
    ) -> Self {
        Self::new(store, config.key_prefix.clone())
    }

    /// Storage key for a page path.
    pub fn key_for(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }

    /// Whether the widget is dismissed on `path`. A failed read counts as
    /// not dismissed.
    pub fn is_dismissed(&self, path: &str) -> bool {
        match self.store.get(&self.key_for(path)) {
            Ok(value) => value.as_deref() == Some(DISMISSED),
            Err(e) => {
                warn!("Failed to read dismissal for '{}': {}", path, e);
                false
            }
        }
    }

    pub fn set_dismissed(&self, path: &str) -> Result<(), StoreError> {
        debug!("Dismissing widget on '{}'", path);
        self.store.set(&self.key_for(path), DISMISSED)
    }

    pub fn clear_dismissed(&self, path: &str) -> Result<(), StoreError> {
        debug!("Clearing dismissal on '{}'", path);
        self.store.remove(&self.key_for(path))
    }
}

impl std::fmt::Debug for DismissalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DismissalStore")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
