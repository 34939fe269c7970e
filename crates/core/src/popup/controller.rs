//! Popup controller.
//!
//! Owns the popup state for one session. Search input is debounced and
//! every asynchronous result carries a sequence number, so a response that
//! arrives after a newer request was started is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::adapters::AdapterRegistry;
use crate::catalog::{AvailabilityApi, SearchCandidate};
use crate::config::{Config, UnknownStreamTypePolicy};
use crate::grouping::{group_with, GroupedOffers};
use crate::page::page_path;

use super::debounce::{Debouncer, SequenceCounter, SequenceGuard};
use super::state::{LoadState, PopupState, PopupTab};
use super::tab::{ActiveTab, TabError};

pub struct PopupController {
    catalog: Arc<dyn AvailabilityApi>,
    registry: AdapterRegistry,
    state: Arc<RwLock<PopupState>>,
    debouncer: Debouncer,
    selections: SequenceCounter,
    trending_requests: SequenceCounter,
    min_query_chars: usize,
    max_results: usize,
    trending_limit: u32,
    country: String,
    unknown_stream_type: UnknownStreamTypePolicy,
}

impl PopupController {
    pub fn new(catalog: Arc<dyn AvailabilityApi>, config: &Config) -> Self {
        Self {
            catalog,
            registry: AdapterRegistry::default(),
            state: Arc::new(RwLock::new(PopupState::default())),
            debouncer: Debouncer::new(Duration::from_millis(config.popup.debounce_ms)),
            selections: SequenceCounter::new(),
            trending_requests: SequenceCounter::new(),
            min_query_chars: config.popup.min_query_chars,
            max_results: config.popup.max_results,
            trending_limit: config.api.trending_limit,
            country: config.api.country.clone(),
            unknown_stream_type: config.grouping.unknown_stream_type,
        }
    }

    /// Current view state.
    pub async fn snapshot(&self) -> PopupState {
        self.state.read().await.clone()
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Handle a change of the search box. Short queries clear the results
    /// immediately; longer ones are searched once input goes quiet.
    pub async fn on_input(&self, text: &str) {
        let query = text.trim().to_string();
        {
            let mut state = self.state.write().await;
            if state.query != query {
                self.selections.invalidate();
                state.clear_selection();
            }
            state.query = query.clone();
        }

        if query.chars().count() < self.min_query_chars {
            self.debouncer.cancel();
            let mut state = self.state.write().await;
            state.search = LoadState::Idle;
            state.results.clear();
            return;
        }

        self.state.write().await.search = LoadState::Loading;

        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);
        let selections = self.selections.clone();
        let max_results = self.max_results;
        self.debouncer.schedule(move |guard| async move {
            run_search(catalog, state, selections, guard, query, max_results).await;
        });
    }

    /// Select the first listed result, as pressing enter does.
    pub async fn submit(&self) -> Option<LoadState> {
        self.select(0).await
    }

    /// Select a search result by its list index.
    pub async fn select(&self, index: usize) -> Option<LoadState> {
        let candidate = self.state.read().await.results.get(index).cloned()?;
        Some(self.select_candidate(candidate).await)
    }

    /// Fetch and show availability for a title whose identity is known.
    pub async fn select_candidate(&self, candidate: SearchCandidate) -> LoadState {
        let guard = self.selections.next();
        {
            let mut state = self.state.write().await;
            state.selected = Some(candidate.clone());
            state.availability = LoadState::Loading;
            state.offers = GroupedOffers::default();
        }

        let (status, offers) = match self
            .catalog
            .fetch_availability(&candidate.id, candidate.content_type)
            .await
        {
            Ok(offers) => (
                LoadState::Ready,
                group_with(&offers, self.unknown_stream_type),
            ),
            Err(e) => {
                warn!("Availability for '{}' failed: {}", candidate.title, e);
                (LoadState::Failed(e.kind()), GroupedOffers::default())
            }
        };

        let mut state = self.state.write().await;
        if !guard.is_current() {
            debug!("Discarding stale availability for '{}'", candidate.title);
            return status;
        }
        state.availability = status;
        state.offers = offers;
        status
    }

    // =========================================================================
    // Trending
    // =========================================================================

    /// Switch tabs. The trending tab loads on first show.
    pub async fn switch_tab(&self, tab: PopupTab) {
        let needs_load = {
            let mut state = self.state.write().await;
            state.tab = tab;
            tab == PopupTab::Trending && state.trending == LoadState::Idle
        };

        if needs_load {
            self.load_trending_services().await;
            self.load_trending(None).await;
        }
    }

    /// Load top titles, optionally for one service only.
    pub async fn load_trending(&self, service: Option<&str>) -> LoadState {
        let guard = self.trending_requests.next();
        {
            let mut state = self.state.write().await;
            state.trending = LoadState::Loading;
            state.trending_filter = service.map(String::from);
        }

        let result = self.catalog.trending(self.trending_limit, service).await;

        let mut state = self.state.write().await;
        let status = match result {
            Ok(items) => {
                if guard.is_current() {
                    state.trending_items = items;
                }
                LoadState::Ready
            }
            Err(e) => {
                warn!("Trending lookup failed: {}", e);
                LoadState::Failed(e.kind())
            }
        };
        if guard.is_current() {
            state.trending = status;
        } else {
            debug!("Discarding stale trending results");
        }
        status
    }

    /// Load the services offered as trending filters.
    pub async fn load_trending_services(&self) -> LoadState {
        match self.catalog.trending_services(&self.country).await {
            Ok(services) => {
                self.state.write().await.trending_services = services;
                LoadState::Ready
            }
            Err(e) => {
                warn!("Trending services lookup failed: {}", e);
                LoadState::Failed(e.kind())
            }
        }
    }

    /// Select a trending title. Its identity is already known, so no
    /// matching is involved.
    pub async fn select_trending(&self, index: usize) -> Option<LoadState> {
        let candidate = self
            .state
            .read()
            .await
            .trending_items
            .get(index)
            .map(|item| item.as_candidate())?;
        Some(self.select_candidate(candidate).await)
    }

    // =========================================================================
    // Active Tab
    // =========================================================================

    /// Whether the tab shows a page the widget supports.
    pub async fn is_supported_tab(&self, tab: &dyn ActiveTab) -> bool {
        match tab.url().await {
            Ok(url) => self.registry.is_supported_url(&url),
            Err(_) => false,
        }
    }

    /// Clear the dismissal for the tab's page and reload it. Returns false
    /// without touching the tab when the page is not supported.
    pub async fn restore_widget(&self, tab: &dyn ActiveTab) -> Result<bool, TabError> {
        let url = tab.url().await?;
        if !self.registry.is_supported_url(&url) {
            debug!("Not restoring widget on unsupported page {}", url);
            return Ok(false);
        }

        let path = page_path(&url);
        info!("Restoring widget on '{}'", path);
        tab.clear_dismissal_and_reload(path).await?;
        Ok(true)
    }
}

async fn run_search(
    catalog: Arc<dyn AvailabilityApi>,
    state: Arc<RwLock<PopupState>>,
    selections: SequenceCounter,
    guard: SequenceGuard,
    query: String,
    max_results: usize,
) {
    debug!("Popup search #{} for '{}'", guard.seq(), query);
    let result = catalog.search(&query).await;

    let mut state = state.write().await;
    if !guard.is_current() {
        debug!("Discarding stale results for '{}'", query);
        return;
    }

    // A new result list replaces whatever was selected from the old one.
    selections.invalidate();
    state.clear_selection();
    match result {
        Ok(mut results) => {
            results.truncate(max_results);
            state.results = results;
            state.search = LoadState::Ready;
        }
        Err(e) => {
            warn!("Popup search for '{}' failed: {}", query, e);
            state.results.clear();
            state.search = LoadState::Failed(e.kind());
        }
    }
}
