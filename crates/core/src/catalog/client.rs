//! HTTP client for the StreamGuide catalog service.
//!
//! All endpoints are unauthenticated JSON GETs under `/v1`.

use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::{
    AvailabilityOffer, ContentType, SearchCandidate, StreamType, TitleId, TrendingItem,
    TrendingService,
};
use super::{AvailabilityApi, CatalogError};
use crate::config::ApiConfig;
use crate::metrics;

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamGuideConfig {
    /// Service root, without the `/v1` segment.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl From<&ApiConfig> for StreamGuideConfig {
    fn from(api: &ApiConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            timeout_secs: api.timeout_secs,
        }
    }
}

/// StreamGuide API client.
pub struct StreamGuideClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl StreamGuideClient {
    /// Create a new client.
    pub fn new(config: StreamGuideConfig) -> Result<Self, CatalogError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// URL of the search endpoint for a query, encoded the way the browser
    /// `encodeURIComponent` does.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}/v1/search?q={}", self.base_url, urlencoding::encode(query))
    }

    /// URL of the availability endpoint. The path segment depends only on the
    /// content type.
    pub fn availability_url(&self, id: &TitleId, content_type: ContentType) -> String {
        format!(
            "{}/v1/{}/{}/streaming",
            self.base_url,
            content_type.endpoint_segment(),
            urlencoding::encode(&id.0)
        )
    }

    /// Run one request under the explicit timeout and record its outcome.
    async fn timed<T, F>(&self, operation: &str, fut: F) -> Result<T, CatalogError>
    where
        F: Future<Output = Result<T, CatalogError>>,
    {
        let started = Instant::now();
        let result = match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::Timeout(self.timeout.as_secs())),
        };

        metrics::CATALOG_REQUEST_DURATION
            .with_label_values(&[operation])
            .observe(started.elapsed().as_secs_f64());
        let label = if result.is_ok() { "success" } else { "failure" };
        metrics::CATALOG_REQUESTS
            .with_label_values(&[operation, label])
            .inc();

        if let Err(e) = &result {
            warn!("StreamGuide {} failed: {}", operation, e);
        }
        result
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        debug!("StreamGuide GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::ParseError(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AvailabilityApi for StreamGuideClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, CatalogError> {
        if query.is_empty() {
            return Err(CatalogError::InvalidRequest(
                "search query cannot be empty".to_string(),
            ));
        }

        let url = self.search_url(query);
        self.timed("search", async {
            let body: SearchResponse = self.get_json(&url).await?;
            debug!("StreamGuide search '{}': {} results", query, body.results.len());
            Ok(body.results)
        })
        .await
    }

    async fn fetch_availability(
        &self,
        id: &TitleId,
        content_type: ContentType,
    ) -> Result<Vec<AvailabilityOffer>, CatalogError> {
        let url = self.availability_url(id, content_type);
        self.timed("availability", async {
            let body: AvailabilityResponse = self.get_json(&url).await?;
            let offers = body.flatten();
            debug!(
                "StreamGuide availability {} {}: {} offers",
                content_type,
                id,
                offers.len()
            );
            Ok(offers)
        })
        .await
    }

    async fn trending(
        &self,
        limit: u32,
        service: Option<&str>,
    ) -> Result<Vec<TrendingItem>, CatalogError> {
        let mut url = format!("{}/v1/trending?limit={}", self.base_url, limit);
        if let Some(service) = service.filter(|s| !s.is_empty()) {
            url.push_str("&service=");
            url.push_str(&urlencoding::encode(service));
        }

        self.timed("trending", async {
            let body: TrendingResponse = self.get_json(&url).await?;
            Ok(body.results)
        })
        .await
    }

    async fn trending_services(
        &self,
        country: &str,
    ) -> Result<Vec<TrendingService>, CatalogError> {
        let url = format!(
            "{}/v1/trending/services?country={}",
            self.base_url,
            urlencoding::encode(country)
        );

        self.timed("trending_services", async {
            let body: TrendingServicesResponse = self.get_json(&url).await?;
            Ok(body.services)
        })
        .await
    }
}

// ============================================================================
// API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchCandidate>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    /// Offers keyed by stream type, in the order the service sent them.
    #[serde(default)]
    providers: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ProviderEntry {
    service_name: String,
    #[serde(default)]
    service_logo: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl AvailabilityResponse {
    /// Flatten the per-type mapping into one list, stamping each offer with
    /// the key it was listed under. Entries that aren't offers are skipped.
    fn flatten(self) -> Vec<AvailabilityOffer> {
        let mut offers = Vec::new();
        let Some(providers) = self.providers else {
            return offers;
        };

        for (key, entries) in providers {
            let stream_type = StreamType::from_key(&key);
            let serde_json::Value::Array(entries) = entries else {
                warn!("StreamGuide providers['{}'] is not a list, skipping", key);
                continue;
            };

            for entry in entries {
                match serde_json::from_value::<ProviderEntry>(entry) {
                    Ok(p) => offers.push(AvailabilityOffer {
                        service_name: p.service_name,
                        service_logo_url: p.service_logo,
                        link: p.link,
                        stream_type: stream_type.clone(),
                    }),
                    Err(e) => debug!("Skipping malformed provider under '{}': {}", key, e),
                }
            }
        }

        offers
    }
}

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    results: Vec<TrendingItem>,
}

#[derive(Debug, Deserialize)]
struct TrendingServicesResponse {
    services: Vec<TrendingService>,
}
