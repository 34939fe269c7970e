//! Search-engine result page (Google).
//!
//! The signal is weak here: eligibility needs a movie-ish keyword in the
//! query or a film/TV knowledge panel, and the content type is always movie.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;
use url::Url;

use super::{anchor_from, SiteAdapter};
use crate::catalog::ContentType;
use crate::page::{Anchor, PageDocument};

const QUERY_KEYWORDS: &[&str] = &[
    "movie",
    "film",
    "watch",
    "streaming",
    "netflix",
    "hulu",
    "disney+",
    "hbo",
    "amazon prime",
];

const KNOWLEDGE_PANEL_LANDMARKS: &[&str] = &[
    r#"[data-attrid="kc:/film/film:reviews"]"#,
    r#"[data-attrid="kc:/tv/tv_program:reviews"]"#,
    r#"[data-attrid="hw:/collection/films:watch providers"]"#,
    r#"[data-attrid="kc:/film/film:director"]"#,
    r#"[data-attrid="kc:/tv/tv_program:seasons"]"#,
];

const TITLE_LANDMARKS: &[&str] = &[r#"[data-attrid="title"]"#];

const ANCHOR_LANDMARKS: &[&str] = &[".kp-wholepage", "#rhs", "#search"];

static GOOGLE_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[a-z0-9-]+\.)*google\.[a-z]{2,3}(?:\.[a-z]{2})?$").unwrap());

static QUERY_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+(?:movie|film|show|tv|watch|streaming|netflix|where to watch)$").unwrap()
});

pub struct SearchResultsAdapter;

impl SearchResultsAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Strip one trailing keyword ("… movie", "… where to watch") from a
    /// search query.
    pub fn clean_query(query: &str) -> String {
        QUERY_SUFFIX.replace(query, "").trim().to_string()
    }

    fn query(page: &PageDocument) -> String {
        page.query_param("q").unwrap_or_default()
    }
}

impl Default for SearchResultsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteAdapter for SearchResultsAdapter {
    fn name(&self) -> &str {
        "search-results"
    }

    fn handles_host(&self, url: &Url) -> bool {
        url.host_str()
            .map(|host| GOOGLE_HOST.is_match(host))
            .unwrap_or(false)
    }

    fn is_supported_url(&self, url: &Url) -> bool {
        self.handles_host(url)
            && url.path() == "/search"
            && url.query_pairs().any(|(k, v)| k == "q" && !v.is_empty())
    }

    fn is_eligible(&self, page: &PageDocument) -> bool {
        if !self.is_supported_url(page.url()) {
            return false;
        }

        let query = Self::query(page).to_lowercase();
        if QUERY_KEYWORDS.iter().any(|kw| query.contains(kw)) {
            return true;
        }

        match page.first_present(KNOWLEDGE_PANEL_LANDMARKS) {
            Some(landmark) => {
                debug!("{}: knowledge panel '{}'", self.name(), landmark);
                true
            }
            None => false,
        }
    }

    fn extract_title(&self, page: &PageDocument) -> Option<String> {
        if let Some((title, _)) = page.first_text(TITLE_LANDMARKS) {
            return Some(title);
        }

        let cleaned = Self::clean_query(&Self::query(page));
        (!cleaned.is_empty()).then_some(cleaned)
    }

    fn infer_content_type(&self, _page: &PageDocument) -> ContentType {
        ContentType::Movie
    }

    fn find_anchor(&self, page: &PageDocument) -> Anchor {
        anchor_from(self.name(), page, ANCHOR_LANDMARKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(query: &str, markup: &str) -> PageDocument {
        let mut url = Url::parse("https://www.google.com/search").unwrap();
        url.query_pairs_mut().append_pair("q", query);
        PageDocument::parse(url, markup)
    }

    #[test]
    fn test_clean_query() {
        assert_eq!(SearchResultsAdapter::clean_query("Inception movie"), "Inception");
        assert_eq!(
            SearchResultsAdapter::clean_query("the bear Where To Watch"),
            "the bear"
        );
        assert_eq!(SearchResultsAdapter::clean_query("Moviedrome"), "Moviedrome");
        assert_eq!(SearchResultsAdapter::clean_query("movie"), "movie");
    }

    #[test]
    fn test_eligible_by_keyword() {
        let adapter = SearchResultsAdapter::new();
        assert!(adapter.is_eligible(&page("inception movie", "")));
        assert!(adapter.is_eligible(&page("is severance on Netflix", "")));
        assert!(!adapter.is_eligible(&page("weather tomorrow", "<html></html>")));
    }

    #[test]
    fn test_eligible_by_knowledge_panel() {
        let adapter = SearchResultsAdapter::new();
        let p = page(
            "dune part two",
            r#"<html><body><div class="kp-wholepage">
            <div data-attrid="kc:/film/film:director">Denis Villeneuve</div>
            <h2 data-attrid="title">Dune: Part Two</h2></div></body></html>"#,
        );
        assert!(adapter.is_eligible(&p));
        assert_eq!(adapter.extract_title(&p).as_deref(), Some("Dune: Part Two"));
        assert_eq!(adapter.find_anchor(&p), Anchor::landmark(".kp-wholepage"));
    }

    #[test]
    fn test_title_from_cleaned_query() {
        let adapter = SearchResultsAdapter::new();
        let p = page("Oppenheimer film", "<html><body><div id=\"search\"></div></body></html>");
        assert_eq!(adapter.extract_title(&p).as_deref(), Some("Oppenheimer"));
        assert_eq!(adapter.infer_content_type(&p), ContentType::Movie);
        assert_eq!(adapter.find_anchor(&p), Anchor::landmark("#search"));
    }

    #[test]
    fn test_host_matching() {
        let adapter = SearchResultsAdapter::new();
        assert!(adapter.handles_host(&Url::parse("https://www.google.com/").unwrap()));
        assert!(adapter.handles_host(&Url::parse("https://google.co.uk/").unwrap()));
        assert!(!adapter.handles_host(&Url::parse("https://google.evil.com/").unwrap()));
    }
}
