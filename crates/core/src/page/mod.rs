//! Host page surface.
//!
//! The core never holds live DOM nodes. A page is seen as its URL plus a
//! markup snapshot, parsed on demand into a [`PageDocument`]. Widget
//! mutations go through the [`HostPage`] trait.

mod document;
mod static_page;

pub use document::PageDocument;
pub use static_page::{MountedWidget, StaticPage};

use std::fmt;

use url::Url;

/// Element id of the widget container. At most one exists per page.
pub const WIDGET_CONTAINER_ID: &str = "streamguide-container";

/// Where the widget is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// A page landmark, identified by the selector that matched it.
    Landmark { selector: String },
    /// The page-wide default (document body).
    PageBody,
}

impl Anchor {
    pub fn landmark(selector: impl Into<String>) -> Self {
        Anchor::Landmark {
            selector: selector.into(),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Landmark { selector } => write!(f, "{}", selector),
            Anchor::PageBody => write!(f, "body"),
        }
    }
}

/// The current page as exposed by the host environment.
pub trait HostPage: Send + Sync {
    /// Current URL of the page.
    fn url(&self) -> Url;

    /// Serialized markup of the page as it is now.
    fn markup(&self) -> String;

    /// Whether a widget container already exists.
    fn has_widget(&self) -> bool;

    /// Create the widget container at the anchor with initial markup.
    fn mount_widget(&self, anchor: &Anchor, markup: &str);

    /// Replace the contents of the existing container.
    fn replace_widget(&self, markup: &str);

    /// Put the container in its minimized visual state. The container stays.
    fn minimize_widget(&self);

    /// Reload the page, discarding any injected widget.
    fn reload(&self);
}

/// Path of a URL used as the dismissal scope. Query and fragment are ignored.
pub fn page_path(url: &Url) -> &str {
    url.path()
}
