//! The browser tab the popup was opened over.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::dismissal::{DismissalStore, StoreError};
use crate::page::HostPage;

/// Errors from the active-tab surface.
#[derive(Debug, Error)]
pub enum TabError {
    /// No tab is active (or it cannot be inspected).
    #[error("No active tab")]
    NoActiveTab,

    /// The tab URL could not be parsed.
    #[error("Invalid tab URL: {0}")]
    InvalidUrl(String),

    /// The dismissal key could not be cleared.
    #[error("Failed to clear dismissal: {0}")]
    Store(#[from] StoreError),

    /// The script could not be run in the tab.
    #[error("Script execution failed: {0}")]
    Script(String),
}

/// The active browser tab as seen from the popup.
#[async_trait]
pub trait ActiveTab: Send + Sync {
    /// Current URL of the tab.
    async fn url(&self) -> Result<Url, TabError>;

    /// Clear the dismissal record for `path` inside the tab's context and
    /// reload the tab.
    async fn clear_dismissal_and_reload(&self, path: &str) -> Result<(), TabError>;
}

/// Active tab over a [`HostPage`] sharing the page's dismissal store.
pub struct PageTab {
    page: Arc<dyn HostPage>,
    dismissals: DismissalStore,
}

impl PageTab {
    pub fn new(page: Arc<dyn HostPage>, dismissals: DismissalStore) -> Self {
        Self { page, dismissals }
    }
}

#[async_trait]
impl ActiveTab for PageTab {
    async fn url(&self) -> Result<Url, TabError> {
        Ok(self.page.url())
    }

    async fn clear_dismissal_and_reload(&self, path: &str) -> Result<(), TabError> {
        self.dismissals.clear_dismissed(path)?;
        info!("Reloading tab after clearing dismissal on '{}'", path);
        self.page.reload();
        Ok(())
    }
}
