//! Popup view state.

use crate::catalog::{FailureKind, SearchCandidate, TrendingItem, TrendingService};
use crate::grouping::GroupedOffers;
use crate::widget::{
    render_popup_availability, render_popup_empty, render_popup_loading, render_popup_results,
    render_trending, render_trending_services,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PopupTab {
    #[default]
    Search,
    Trending,
}

/// Progress of one popup list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(FailureKind),
}

/// Everything the popup shows, owned by the controller for one session.
#[derive(Debug, Clone, Default)]
pub struct PopupState {
    pub tab: PopupTab,
    /// Trimmed text of the search box.
    pub query: String,
    pub search: LoadState,
    pub results: Vec<SearchCandidate>,
    pub selected: Option<SearchCandidate>,
    pub availability: LoadState,
    pub offers: GroupedOffers,
    pub trending: LoadState,
    pub trending_filter: Option<String>,
    pub trending_items: Vec<TrendingItem>,
    pub trending_services: Vec<TrendingService>,
}

impl PopupState {
    /// Drop the selected title and its availability.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.availability = LoadState::Idle;
        self.offers = GroupedOffers::default();
    }

    pub fn results_markup(&self) -> String {
        match self.search {
            LoadState::Idle => String::new(),
            LoadState::Loading => render_popup_loading("Searching..."),
            LoadState::Ready => render_popup_results(&self.results),
            LoadState::Failed(_) => render_popup_empty("Search failed. Please try again."),
        }
    }

    pub fn availability_markup(&self) -> String {
        match self.availability {
            LoadState::Idle => String::new(),
            LoadState::Loading => render_popup_loading("Loading streaming options..."),
            LoadState::Ready => render_popup_availability(&self.offers),
            LoadState::Failed(_) => render_popup_empty("Unable to load streaming options"),
        }
    }

    pub fn trending_markup(&self) -> String {
        let filters = render_trending_services(&self.trending_services);
        let list = match self.trending {
            LoadState::Idle => String::new(),
            LoadState::Loading => render_popup_loading("Loading trending titles..."),
            LoadState::Ready => render_trending(&self.trending_items),
            LoadState::Failed(_) => render_popup_empty("Unable to load trending titles"),
        };
        format!(r#"<div class="service-filters">{}</div>{}"#, filters, list)
    }
}
