//! Reviews-aggregator site (Rotten Tomatoes).

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;
use url::Url;

use super::{anchor_from, host_is, SiteAdapter};
use crate::catalog::ContentType;
use crate::page::{Anchor, PageDocument};

const TITLE_LANDMARKS: &[&str] = &[
    r#"[data-qa="score-panel-title"]"#,
    r#"[data-qa="score-panel-series-title"]"#,
    r#"h1[slot="title"]"#,
    r#"h1[slot="titleIntro"]"#,
    "h1.title",
    ".scoreboard__title",
    "h1",
];

const ANCHOR_LANDMARKS: &[&str] = &[
    r#"[data-qa="where-to-watch-section"]"#,
    r#"[data-qa="score-panel"]"#,
    ".scoreboard",
    r#"section[data-qa="critics-score"]"#,
    "aside",
    "main",
    "#main-page-content",
];

static DOCUMENT_TITLE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" - Rotten Tomatoes$").unwrap());

pub struct ReviewsAdapter;

impl ReviewsAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReviewsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteAdapter for ReviewsAdapter {
    fn name(&self) -> &str {
        "reviews"
    }

    fn handles_host(&self, url: &Url) -> bool {
        host_is(url, "rottentomatoes.com")
    }

    fn is_supported_url(&self, url: &Url) -> bool {
        self.handles_host(url) && (url.path().starts_with("/m/") || url.path().starts_with("/tv/"))
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
        if page.url().path().starts_with("/tv/") {
            ContentType::Show
        } else {
            ContentType::Movie
        }
    }

    fn find_anchor(&self, page: &PageDocument) -> Anchor {
        anchor_from(self.name(), page, ANCHOR_LANDMARKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str, markup: &str) -> PageDocument {
        PageDocument::parse(
            Url::parse(&format!("https://www.rottentomatoes.com{}", path)).unwrap(),
            markup,
        )
    }

    #[test]
    fn test_title_priority_order() {
        let p = page(
            "/m/dune_part_two",
            r#"<html><body><h1>Generic heading</h1>
            <h1 slot="title">Dune: Part Two</h1></body></html>"#,
        );
        assert_eq!(
            ReviewsAdapter::new().extract_title(&p).as_deref(),
            Some("Dune: Part Two")
        );
    }

    #[test]
    fn test_title_from_document_title_when_landmarks_absent() {
        let p = page(
            "/m/dune_part_two",
            "<html><head><title>Dune: Part Two - Rotten Tomatoes</title></head><body><p>x</p></body></html>",
        );
        assert_eq!(
            ReviewsAdapter::new().extract_title(&p).as_deref(),
            Some("Dune: Part Two")
        );
    }

    #[test]
    fn test_content_type_from_path() {
        let adapter = ReviewsAdapter::new();
        assert_eq!(
            adapter.infer_content_type(&page("/tv/severance", "")),
            ContentType::Show
        );
        assert_eq!(
            adapter.infer_content_type(&page("/m/severance", "")),
            ContentType::Movie
        );
    }

    #[test]
    fn test_eligibility() {
        let adapter = ReviewsAdapter::new();
        assert!(adapter.is_eligible(&page("/m/dune", "")));
        assert!(adapter.is_eligible(&page("/tv/severance/s01", "")));
        assert!(!adapter.is_eligible(&page("/browse/movies_at_home", "")));
    }

    #[test]
    fn test_anchor_widest_fallback() {
        let adapter = ReviewsAdapter::new();
        let with_main = page("/m/dune", "<html><body><main></main><aside></aside></body></html>");
        assert_eq!(adapter.find_anchor(&with_main), Anchor::landmark("aside"));

        let bare = page("/m/dune", "<html><body><p>x</p></body></html>");
        assert_eq!(adapter.find_anchor(&bare), Anchor::PageBody);
    }
}
