use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// A parsed snapshot of a page, queried by CSS selectors.
///
/// `scraper::Html` is not `Send`, so a document is built, queried and
/// dropped without crossing an `.await`.
pub struct PageDocument {
    url: Url,
    html: Html,
}

impl PageDocument {
    /// Parse page markup.
    pub fn parse(url: Url, markup: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(markup),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn selector(raw: &str) -> Option<Selector> {
        match Selector::parse(raw) {
            Ok(selector) => Some(selector),
            Err(e) => {
                debug!("Ignoring invalid selector '{}': {:?}", raw, e);
                None
            }
        }
    }

    /// Whether any element matches the selector.
    pub fn exists(&self, raw: &str) -> bool {
        Self::selector(raw)
            .map(|s| self.html.select(&s).next().is_some())
            .unwrap_or(false)
    }

    /// First selector in the list that matches an element.
    pub fn first_present<'a>(&self, selectors: &[&'a str]) -> Option<&'a str> {
        selectors.iter().copied().find(|raw| self.exists(raw))
    }

    /// Whitespace-collapsed text of the first element matching the selector,
    /// if non-empty.
    pub fn text_of(&self, raw: &str) -> Option<String> {
        let selector = Self::selector(raw)?;
        let element = self.html.select(&selector).next()?;
        let text = collapse_whitespace(&element.text().collect::<String>());
        (!text.is_empty()).then_some(text)
    }

    /// Text of the first selector, in order, whose first match has
    /// non-empty text. Returns the text and the selector that produced it.
    pub fn first_text<'a>(&self, selectors: &[&'a str]) -> Option<(String, &'a str)> {
        selectors
            .iter()
            .copied()
            .find_map(|raw| self.text_of(raw).map(|text| (text, raw)))
    }

    /// Content of a `<meta property=...>` or `<meta name=...>` tag.
    pub fn meta_content(&self, key: &str) -> Option<String> {
        let selector = Self::selector("meta[property], meta[name]")?;
        self.html
            .select(&selector)
            .find(|el| {
                el.value().attr("property") == Some(key) || el.value().attr("name") == Some(key)
            })
            .and_then(|el| el.value().attr("content"))
            .map(str::to_string)
    }

    /// The document `<title>`, whitespace-collapsed.
    pub fn document_title(&self) -> Option<String> {
        self.text_of("title")
    }

    /// Value of a query-string parameter of the page URL.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
