//! Per-page widget injection.
//!
//! One run per page load: guard checks, title extraction, search, match,
//! availability fetch and render. The run never re-enters; showing the
//! widget again requires a reload.

mod runner;
mod types;

pub use runner::InjectionOrchestrator;
pub use types::{DismissControl, InjectionOutcome, InjectionReport, RunState, SkipReason};
