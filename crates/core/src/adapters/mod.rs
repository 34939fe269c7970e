//! Per-site adapters.
//!
//! Each supported site family gets one small adapter that knows its URL
//! shape and page landmarks. Adapters are pure with respect to the page
//! snapshot they are given and never touch the network.

mod reviews;
mod search_results;
mod title_detail;

pub use reviews::ReviewsAdapter;
pub use search_results::SearchResultsAdapter;
pub use title_detail::TitleDetailAdapter;

use tracing::debug;
use url::Url;

use crate::catalog::ContentType;
use crate::page::{Anchor, PageDocument};

/// What an adapter derives from a page: the title, its content type and
/// where the widget should go.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSignal {
    pub title: Option<String>,
    pub content_type: ContentType,
    pub anchor: Anchor,
}

/// Site-specific page knowledge.
pub trait SiteAdapter: Send + Sync {
    /// Name of this adapter for logging.
    fn name(&self) -> &str;

    /// Whether this adapter is responsible for the URL's host.
    fn handles_host(&self, url: &Url) -> bool;

    /// URL-only check for a page this adapter can serve.
    fn is_supported_url(&self, url: &Url) -> bool;

    /// Cheap, synchronous page-type check, run before any network activity.
    fn is_eligible(&self, page: &PageDocument) -> bool;

    /// Title being viewed, from landmarks first and derived text second.
    /// `None` means no widget should be shown.
    fn extract_title(&self, page: &PageDocument) -> Option<String>;

    /// Content type from the cheapest reliable signal. Movie when unsure.
    fn infer_content_type(&self, page: &PageDocument) -> ContentType;

    /// Preferred insertion point, falling back to the page body.
    fn find_anchor(&self, page: &PageDocument) -> Anchor;

    /// Derive the full probe signal.
    fn probe(&self, page: &PageDocument) -> ProbeSignal {
        ProbeSignal {
            title: self.extract_title(page),
            content_type: self.infer_content_type(page),
            anchor: self.find_anchor(page),
        }
    }
}

/// Ordered landmark lookup shared by the adapters' `find_anchor`.
pub(crate) fn anchor_from(adapter: &str, page: &PageDocument, landmarks: &[&str]) -> Anchor {
    match page.first_present(landmarks) {
        Some(selector) => {
            debug!("{}: injection point '{}'", adapter, selector);
            Anchor::landmark(selector)
        }
        None => {
            debug!("{}: no landmark found, using page body", adapter);
            Anchor::PageBody
        }
    }
}

/// Whether `host` is `domain` or one of its subdomains.
pub(crate) fn host_is(url: &Url, domain: &str) -> bool {
    url.host_str()
        .map(|host| host == domain || host.ends_with(&format!(".{}", domain)))
        .unwrap_or(false)
}

/// The set of adapters consulted for a page, dispatched by host.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn SiteAdapter>>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new(vec![
            Box::new(TitleDetailAdapter::new()),
            Box::new(ReviewsAdapter::new()),
            Box::new(SearchResultsAdapter::new()),
        ])
    }
}

impl AdapterRegistry {
    pub fn new(adapters: Vec<Box<dyn SiteAdapter>>) -> Self {
        Self { adapters }
    }

    /// Adapter responsible for the URL's host, if any.
    pub fn for_url(&self, url: &Url) -> Option<&dyn SiteAdapter> {
        self.adapters
            .iter()
            .find(|a| a.handles_host(url))
            .map(|a| a.as_ref())
    }

    /// Whether any adapter serves this URL. Used by the popup to decide
    /// whether to offer showing the widget again.
    pub fn is_supported_url(&self, url: &Url) -> bool {
        self.for_url(url)
            .map(|a| a.is_supported_url(url))
            .unwrap_or(false)
    }
}
