//! Client for the remote catalog/availability service.
//!
//! Every operation makes exactly one attempt. Transport errors, non-2xx
//! statuses, malformed bodies and timeouts all surface as [`CatalogError`],
//! which callers must check before using any data.

mod client;
mod types;

pub use client::{StreamGuideClient, StreamGuideConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Failure taxonomy shared by the orchestrator and the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport error, non-2xx status, malformed body or timeout.
    NetworkFailure,
    /// Well-formed response with zero usable items.
    EmptyResult,
    /// No title could be derived from the page.
    ExtractionFailure,
    /// Page not recognized as relevant.
    Ineligible,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NetworkFailure => "network_failure",
            FailureKind::EmptyResult => "empty_result",
            FailureKind::ExtractionFailure => "extraction_failure",
            FailureKind::Ineligible => "ineligible",
        }
    }
}

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The call did not complete within the configured timeout.
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// The request was rejected before being sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CatalogError {
    /// All catalog errors collapse into a single network-level failure.
    pub fn kind(&self) -> FailureKind {
        FailureKind::NetworkFailure
    }
}

/// Operations offered by the catalog/availability service.
#[async_trait]
pub trait AvailabilityApi: Send + Sync {
    /// Search titles by free text. The query is sent as given (no trimming)
    /// and must not be empty.
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, CatalogError>;

    /// Fetch where a title can be watched, flattened into one list with each
    /// offer stamped with the stream type it was listed under.
    async fn fetch_availability(
        &self,
        id: &TitleId,
        content_type: ContentType,
    ) -> Result<Vec<AvailabilityOffer>, CatalogError>;

    /// Top titles, optionally restricted to one service.
    async fn trending(
        &self,
        limit: u32,
        service: Option<&str>,
    ) -> Result<Vec<TrendingItem>, CatalogError>;

    /// Services available as a trending filter for a country.
    async fn trending_services(&self, country: &str)
        -> Result<Vec<TrendingService>, CatalogError>;
}
