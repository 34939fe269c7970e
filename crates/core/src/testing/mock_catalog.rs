//! Mock catalog service for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::{
    AvailabilityApi, AvailabilityOffer, CatalogError, ContentType, SearchCandidate, TitleId,
    TrendingItem, TrendingService,
};

/// A recorded catalog call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCatalogQuery {
    Search { query: String },
    Availability { id: TitleId, content_type: ContentType },
    Trending { limit: u32, service: Option<String> },
    TrendingServices { country: String },
}

/// Mock implementation of the AvailabilityApi trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable search, availability and trending results
/// - Track calls for assertions
/// - Simulate failures and slow responses
///
/// # Example
///
/// ```rust,ignore
/// use streamguide_core::testing::{MockCatalog, fixtures};
///
/// let catalog = MockCatalog::new();
/// catalog.set_search_results(vec![fixtures::movie(1, "Inception", Some(2010))]).await;
///
/// let results = catalog.search("Inception").await?;
/// assert_eq!(results.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockCatalog {
    /// Results for any query without a specific entry.
    search_results: Arc<RwLock<Vec<SearchCandidate>>>,
    /// Results by exact query text.
    search_by_query: Arc<RwLock<HashMap<String, Vec<SearchCandidate>>>>,
    /// Offers for any title without a specific entry.
    availability: Arc<RwLock<Vec<AvailabilityOffer>>>,
    /// Offers by title id.
    availability_by_id: Arc<RwLock<HashMap<TitleId, Vec<AvailabilityOffer>>>>,
    trending: Arc<RwLock<Vec<TrendingItem>>>,
    trending_services: Arc<RwLock<Vec<TrendingService>>>,
    /// Recorded calls.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
    /// Every availability call fails while set.
    fail_availability: Arc<RwLock<bool>>,
    /// Delays applied before answering, by query text.
    search_delays: Arc<RwLock<HashMap<String, Duration>>>,
    availability_delays: Arc<RwLock<HashMap<TitleId, Duration>>>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            search_results: Arc::new(RwLock::new(Vec::new())),
            search_by_query: Arc::new(RwLock::new(HashMap::new())),
            availability: Arc::new(RwLock::new(Vec::new())),
            availability_by_id: Arc::new(RwLock::new(HashMap::new())),
            trending: Arc::new(RwLock::new(Vec::new())),
            trending_services: Arc::new(RwLock::new(Vec::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            fail_availability: Arc::new(RwLock::new(false)),
            search_delays: Arc::new(RwLock::new(HashMap::new())),
            availability_delays: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    // =========================================================================
    // Search Configuration
    // =========================================================================

    /// Set the results returned for any query.
    pub async fn set_search_results(&self, results: Vec<SearchCandidate>) {
        *self.search_results.write().await = results;
    }

    /// Set the results returned for one exact query.
    pub async fn set_search_results_for(&self, query: &str, results: Vec<SearchCandidate>) {
        self.search_by_query
            .write()
            .await
            .insert(query.to_string(), results);
    }

    /// Delay the answer to one exact query.
    pub async fn set_search_delay(&self, query: &str, delay: Duration) {
        self.search_delays
            .write()
            .await
            .insert(query.to_string(), delay);
    }

    // =========================================================================
    // Availability Configuration
    // =========================================================================

    /// Set the offers returned for any title.
    pub async fn set_availability(&self, offers: Vec<AvailabilityOffer>) {
        *self.availability.write().await = offers;
    }

    /// Set the offers returned for one title.
    pub async fn set_availability_for(
        &self,
        id: impl Into<TitleId>,
        offers: Vec<AvailabilityOffer>,
    ) {
        self.availability_by_id.write().await.insert(id.into(), offers);
    }

    /// Delay the availability answer for one title.
    pub async fn set_availability_delay(&self, id: impl Into<TitleId>, delay: Duration) {
        self.availability_delays
            .write()
            .await
            .insert(id.into(), delay);
    }

    /// Make every availability call fail until reset.
    pub async fn fail_availability(&self, fail: bool) {
        *self.fail_availability.write().await = fail;
    }

    // =========================================================================
    // Trending Configuration
    // =========================================================================

    pub async fn set_trending(&self, items: Vec<TrendingItem>) {
        *self.trending.write().await = items;
    }

    pub async fn set_trending_services(&self, services: Vec<TrendingService>) {
        *self.trending_services.write().await = services;
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Clear recorded queries.
    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }

    /// Get the number of calls performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }

    async fn record(&self, query: RecordedCatalogQuery) {
        self.queries.write().await.push(query);
    }
}

#[async_trait]
impl AvailabilityApi for MockCatalog {
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, CatalogError> {
        self.record(RecordedCatalogQuery::Search {
            query: query.to_string(),
        })
        .await;

        let delay = self.search_delays.read().await.get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        if let Some(results) = self.search_by_query.read().await.get(query) {
            return Ok(results.clone());
        }
        Ok(self.search_results.read().await.clone())
    }

    async fn fetch_availability(
        &self,
        id: &TitleId,
        content_type: ContentType,
    ) -> Result<Vec<AvailabilityOffer>, CatalogError> {
        self.record(RecordedCatalogQuery::Availability {
            id: id.clone(),
            content_type,
        })
        .await;

        let delay = self.availability_delays.read().await.get(id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        if *self.fail_availability.read().await {
            return Err(CatalogError::ApiError {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }

        if let Some(offers) = self.availability_by_id.read().await.get(id) {
            return Ok(offers.clone());
        }
        Ok(self.availability.read().await.clone())
    }

    async fn trending(
        &self,
        limit: u32,
        service: Option<&str>,
    ) -> Result<Vec<TrendingItem>, CatalogError> {
        self.record(RecordedCatalogQuery::Trending {
            limit,
            service: service.map(String::from),
        })
        .await;

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        let items = self.trending.read().await;
        Ok(items
            .iter()
            .filter(|item| match service {
                Some(name) => item.service_name.as_deref() == Some(name),
                None => true,
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn trending_services(
        &self,
        country: &str,
    ) -> Result<Vec<TrendingService>, CatalogError> {
        self.record(RecordedCatalogQuery::TrendingServices {
            country: country.to_string(),
        })
        .await;

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        Ok(self.trending_services.read().await.clone())
    }
}
