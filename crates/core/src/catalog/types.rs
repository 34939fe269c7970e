//! Types for catalog/availability API responses.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Whether a title is a film or a series.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Movie,
    Show,
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ContentType::from_wire(&raw))
    }
}

impl ContentType {
    /// Anything the service does not call a movie is routed as a show
    /// (`tv`, `series`, ...).
    pub fn from_wire(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("movie") {
            ContentType::Movie
        } else {
            ContentType::Show
        }
    }

    /// Path segment of the availability endpoint for this content type.
    pub fn endpoint_segment(&self) -> &'static str {
        match self {
            ContentType::Movie => "movies",
            ContentType::Show => "shows",
        }
    }

    /// Human-readable label used in result listings.
    pub fn display_label(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::Show => "TV Show",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Movie => write!(f, "movie"),
            ContentType::Show => write!(f, "show"),
        }
    }
}

/// Catalog identifier of a title.
///
/// The service sends numeric ids, but string ids are accepted too so a
/// change on its side doesn't fail every search.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TitleId(pub String);

impl<'de> Deserialize<'de> for TitleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => TitleId(n.to_string()),
            RawId::Text(s) => TitleId(s),
        })
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for TitleId {
    fn from(n: u64) -> Self {
        TitleId(n.to_string())
    }
}

impl From<&str> for TitleId {
    fn from(s: &str) -> Self {
        TitleId(s.to_string())
    }
}

/// A title returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchCandidate {
    pub id: TitleId,
    pub title: String,
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}

/// Commercial category of an availability offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StreamType {
    #[default]
    Subscription,
    Free,
    Ads,
    Rent,
    Buy,
    /// A category outside the fixed vocabulary, kept verbatim.
    Other(String),
}

/// The five known stream types in display order.
pub static STREAM_TYPE_ORDER: [StreamType; 5] = [
    StreamType::Subscription,
    StreamType::Free,
    StreamType::Ads,
    StreamType::Rent,
    StreamType::Buy,
];

impl StreamType {
    /// Parse a wire key. An empty key means subscription.
    pub fn from_key(key: &str) -> Self {
        match key {
            "" | "subscription" => StreamType::Subscription,
            "free" => StreamType::Free,
            "ads" => StreamType::Ads,
            "rent" => StreamType::Rent,
            "buy" => StreamType::Buy,
            other => StreamType::Other(other.to_string()),
        }
    }

    pub fn as_key(&self) -> &str {
        match self {
            StreamType::Subscription => "subscription",
            StreamType::Free => "free",
            StreamType::Ads => "ads",
            StreamType::Rent => "rent",
            StreamType::Buy => "buy",
            StreamType::Other(key) => key,
        }
    }

    /// Section label shown in the widget. Unknown types display verbatim.
    pub fn label(&self) -> &str {
        match self {
            StreamType::Subscription => "Streaming",
            StreamType::Free => "Free",
            StreamType::Ads => "Free with Ads",
            StreamType::Rent => "Rent",
            StreamType::Buy => "Buy",
            StreamType::Other(key) => key,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, StreamType::Other(_))
    }
}

impl Serialize for StreamType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_key())
    }
}

impl<'de> Deserialize<'de> for StreamType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        Ok(StreamType::from_key(&key))
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// One place a title can be watched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityOffer {
    pub service_name: String,
    #[serde(default, rename = "service_logo", skip_serializing_if = "Option::is_none")]
    pub service_logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub stream_type: StreamType,
}

/// A title from the trending endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingItem {
    pub id: TitleId,
    pub title: String,
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

impl TrendingItem {
    /// Trending items already carry their identity, so they select directly.
    pub fn as_candidate(&self) -> SearchCandidate {
        SearchCandidate {
            id: self.id.clone(),
            title: self.title.clone(),
            content_type: self.content_type,
            year: self.year,
        }
    }
}

/// A service that can be used to filter trending titles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingService {
    pub service_name: String,
    #[serde(default)]
    pub title_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_aliases() {
        let ct: ContentType = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(ct, ContentType::Movie);
        let ct: ContentType = serde_json::from_str("\"tv\"").unwrap();
        assert_eq!(ct, ContentType::Show);
        let ct: ContentType = serde_json::from_str("\"miniseries\"").unwrap();
        assert_eq!(ct, ContentType::Show);
    }

    #[test]
    fn test_endpoint_segment() {
        assert_eq!(ContentType::Movie.endpoint_segment(), "movies");
        assert_eq!(ContentType::Show.endpoint_segment(), "shows");
    }

    #[test]
    fn test_title_id_accepts_number_and_string() {
        let c: SearchCandidate = serde_json::from_str(
            r#"{"id": 1, "title": "Inception", "content_type": "movie", "year": 2010}"#,
        )
        .unwrap();
        assert_eq!(c.id, TitleId::from(1));
        assert_eq!(c.year, Some(2010));

        let raw = r#"{"id": "tt1375666", "title": "Inception", "content_type": "movie"}"#;
        let c: SearchCandidate = serde_json::from_str(raw).unwrap();
        assert_eq!(c.id.to_string(), "tt1375666");
        assert_eq!(c.year, None);
    }

    #[test]
    fn test_stream_type_labels() {
        assert_eq!(StreamType::Subscription.label(), "Streaming");
        assert_eq!(StreamType::Ads.label(), "Free with Ads");
        assert_eq!(StreamType::from_key("addon").label(), "addon");
        assert_eq!(StreamType::from_key(""), StreamType::Subscription);
    }

    #[test]
    fn test_offer_defaults_to_subscription() {
        let offer: AvailabilityOffer =
            serde_json::from_str(r#"{"service_name": "MaxFlix"}"#).unwrap();
        assert_eq!(offer.stream_type, StreamType::Subscription);
        assert!(offer.link.is_none());
    }
}
