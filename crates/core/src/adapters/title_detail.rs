//! Title-detail site (IMDb).
//!
//! Title pages live under `/title/tt…`. Movies and series share the URL
//! shape, so the content type comes from `og:type` or the episode list.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;
use url::Url;

use super::{anchor_from, host_is, SiteAdapter};
use crate::catalog::ContentType;
use crate::page::{Anchor, PageDocument};

const TITLE_LANDMARKS: &[&str] = &[
    r#"[data-testid="hero__pageTitle"]"#,
    r#"h1[data-testid="hero-title-block__title"]"#,
    "h1",
];

const EPISODE_LANDMARK: &str = r#"[data-testid="episodes-header"]"#;

const ANCHOR_LANDMARKS: &[&str] = &[
    r#"[data-testid="tm-box-watch-options"]"#,
    r#"[data-testid="hero-rating-bar__user-rating"]"#,
    r#"[data-testid="hero-title-block__title"]"#,
];

/// `Inception (2010) - IMDb`, `Severance (TV Series 2022– ) - IMDb`
static DOCUMENT_TITLE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\s*\([^()]*\d{4}[^()]*\))?\s*-\s*IMDb\s*$").unwrap()
});

pub struct TitleDetailAdapter;

impl TitleDetailAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TitleDetailAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteAdapter for TitleDetailAdapter {
    fn name(&self) -> &str {
        "title-detail"
    }

    fn handles_host(&self, url: &Url) -> bool {
        host_is(url, "imdb.com")
    }

    fn is_supported_url(&self, url: &Url) -> bool {
        self.handles_host(url) && url.path().starts_with("/title/")
    }

    fn is_eligible(&self, page: &PageDocument) -> bool {
        self.is_supported_url(page.url())
    }

    fn extract_title(&self, page: &PageDocument) -> Option<String> {
        if let Some((title, selector)) = page.first_text(TITLE_LANDMARKS) {
            debug!("{}: title from '{}'", self.name(), selector);
            return Some(title);
        }

        let title = page.document_title()?;
        let cleaned = DOCUMENT_TITLE_SUFFIX.replace(&title, "").trim().to_string();
        (!cleaned.is_empty()).then_some(cleaned)
    }

    fn infer_content_type(&self, page: &PageDocument) -> ContentType {
        let og_type = page.meta_content("og:type").unwrap_or_default();
        if og_type.contains("tv") || page.exists(EPISODE_LANDMARK) {
            ContentType::Show
        } else {
            ContentType::Movie
        }
    }

    fn find_anchor(&self, page: &PageDocument) -> Anchor {
        anchor_from(self.name(), page, ANCHOR_LANDMARKS)
    }
}
