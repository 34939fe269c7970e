//! Testing utilities and mock implementations.
//!
//! `MockCatalog` stands in for the remote service so injection runs and
//! popup flows can be tested without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use streamguide_core::testing::{fixtures, MockCatalog};
//!
//! let catalog = MockCatalog::new();
//! catalog.set_search_results(vec![fixtures::movie(1, "Inception", Some(2010))]).await;
//! catalog.set_availability(vec![fixtures::offer("MaxFlix", StreamType::Subscription)]).await;
//! ```

mod mock_catalog;

pub use mock_catalog::{MockCatalog, RecordedCatalogQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{
        AvailabilityOffer, ContentType, SearchCandidate, StreamType, TitleId, TrendingItem,
        TrendingService,
    };

    /// Create a movie search candidate.
    pub fn movie(id: u64, title: &str, year: Option<u32>) -> SearchCandidate {
        SearchCandidate {
            id: TitleId::from(id),
            title: title.to_string(),
            content_type: ContentType::Movie,
            year,
        }
    }

    /// Create a show search candidate.
    pub fn show(id: u64, title: &str, year: Option<u32>) -> SearchCandidate {
        SearchCandidate {
            id: TitleId::from(id),
            title: title.to_string(),
            content_type: ContentType::Show,
            year,
        }
    }

    /// Create an offer with no logo and no link.
    pub fn offer(service_name: &str, stream_type: StreamType) -> AvailabilityOffer {
        AvailabilityOffer {
            service_name: service_name.to_string(),
            service_logo_url: None,
            link: None,
            stream_type,
        }
    }

    /// Create a trending movie.
    pub fn trending(id: u64, title: &str, service_name: Option<&str>) -> TrendingItem {
        TrendingItem {
            id: TitleId::from(id),
            title: title.to_string(),
            content_type: ContentType::Movie,
            year: None,
            service_name: service_name.map(String::from),
        }
    }

    pub fn trending_service(service_name: &str, title_count: u32) -> TrendingService {
        TrendingService {
            service_name: service_name.to_string(),
            title_count,
        }
    }

    /// Minimal title-detail page markup with a hero title.
    pub fn title_detail_markup(title: &str) -> String {
        format!(
            r#"<html><head><title>{title} (2010) - IMDb</title></head><body>
            <section><h1 data-testid="hero__pageTitle"><span>{title}</span></h1>
            <div data-testid="hero-rating-bar__user-rating">8.8</div></section>
            </body></html>"#
        )
    }

    /// Reviews page markup carrying only a document title.
    pub fn reviews_markup_without_landmarks(document_title: &str) -> String {
        format!(
            r#"<html><head><title>{document_title}</title></head><body><main><p>Reviews</p></main></body></html>"#
        )
    }
}
