//! Injection orchestrator implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::adapters::{AdapterRegistry, ProbeSignal};
use crate::catalog::{AvailabilityApi, FailureKind};
use crate::config::{Config, UnknownStreamTypePolicy};
use crate::dismissal::DismissalStore;
use crate::grouping::group_with;
use crate::matcher::select_best_match;
use crate::metrics::{INJECTION_OUTCOMES, SKIP_REASONS};
use crate::page::{page_path, HostPage, PageDocument};
use crate::widget::{render, WidgetState};

use super::types::{DismissControl, InjectionOutcome, InjectionReport, RunState, SkipReason};

/// Drives one page through the injection state machine.
pub struct InjectionOrchestrator {
    registry: AdapterRegistry,
    catalog: Arc<dyn AvailabilityApi>,
    dismissals: DismissalStore,
    unknown_stream_type: UnknownStreamTypePolicy,
}

/// Transition log for a single run.
struct Run {
    transitions: Vec<RunState>,
}

impl Run {
    fn start() -> Self {
        Self {
            transitions: vec![RunState::Idle],
        }
    }

    fn enter(&mut self, state: RunState) {
        debug!("Injection state -> {}", state);
        self.transitions.push(state);
    }

    fn finish(self, outcome: InjectionOutcome) -> InjectionReport {
        INJECTION_OUTCOMES
            .with_label_values(&[outcome.label()])
            .inc();
        InjectionReport {
            transitions: self.transitions,
            outcome,
        }
    }

    fn skip(mut self, reason: SkipReason) -> InjectionReport {
        debug!("Skipping injection: {}", reason);
        SKIP_REASONS.with_label_values(&[reason.as_str()]).inc();
        self.enter(RunState::Skipped);
        self.finish(InjectionOutcome::Skipped(reason))
    }

    fn fail(mut self, page: &dyn HostPage, kind: FailureKind) -> InjectionReport {
        warn!("Injection failed: {}", kind.as_str());
        page.replace_widget(&render(&WidgetState::Failed { kind }));
        self.enter(RunState::Failed);
        self.finish(InjectionOutcome::Failed(kind))
    }
}

impl InjectionOrchestrator {
    pub fn new(
        registry: AdapterRegistry,
        catalog: Arc<dyn AvailabilityApi>,
        dismissals: DismissalStore,
    ) -> Self {
        Self {
            registry,
            catalog,
            dismissals,
            unknown_stream_type: UnknownStreamTypePolicy::default(),
        }
    }

    /// Build from configuration with the default adapter set.
    pub fn from_config(
        config: &Config,
        catalog: Arc<dyn AvailabilityApi>,
        dismissals: DismissalStore,
    ) -> Self {
        Self::new(AdapterRegistry::default(), catalog, dismissals)
            .with_unknown_stream_type(config.grouping.unknown_stream_type)
    }

    pub fn with_unknown_stream_type(mut self, policy: UnknownStreamTypePolicy) -> Self {
        self.unknown_stream_type = policy;
        self
    }

    /// Eligibility and probe against a fresh snapshot of the page.
    ///
    /// The parsed document stays inside this call.
    fn probe(&self, page: &dyn HostPage) -> Option<ProbeSignal> {
        let url = page.url();
        let adapter = self.registry.for_url(&url)?;
        let document = PageDocument::parse(url, &page.markup());
        if !adapter.is_eligible(&document) {
            return None;
        }
        debug!("{}: page eligible", adapter.name());
        Some(adapter.probe(&document))
    }

    /// Run the injection state machine once against `page`.
    pub async fn inject(&self, page: Arc<dyn HostPage>) -> InjectionReport {
        let mut run = Run::start();
        run.enter(RunState::Checking);

        if page.has_widget() {
            return run.skip(SkipReason::AlreadyInjected);
        }

        let Some(signal) = self.probe(page.as_ref()) else {
            return run.skip(SkipReason::Ineligible);
        };

        let path = page_path(&page.url()).to_string();
        if self.dismissals.is_dismissed(&path) {
            return run.skip(SkipReason::Dismissed);
        }

        let Some(title) = signal.title else {
            return run.skip(SkipReason::NoTitle);
        };

        // Container and placeholder go in before the first await.
        page.mount_widget(&signal.anchor, &render(&WidgetState::Loading));
        run.enter(RunState::Loading);
        info!(
            "Looking up '{}' ({}) for {} at {}",
            title, signal.content_type, path, signal.anchor
        );

        let candidates = match self.catalog.search(&title).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Search for '{}' failed: {}", title, e);
                return run.fail(page.as_ref(), e.kind());
            }
        };

        let Some(matched) = select_best_match(&candidates, signal.content_type).cloned() else {
            return run.fail(page.as_ref(), FailureKind::EmptyResult);
        };
        debug!(
            "Matched '{}' to '{}' ({}, id {})",
            title, matched.title, matched.content_type, matched.id
        );

        let offers = match self
            .catalog
            .fetch_availability(&matched.id, matched.content_type)
            .await
        {
            Ok(offers) => offers,
            Err(e) => {
                warn!("Availability for '{}' failed: {}", matched.title, e);
                return run.fail(page.as_ref(), e.kind());
            }
        };

        let groups = group_with(&offers, self.unknown_stream_type);
        if groups.discarded() > 0 {
            debug!("Discarded {} offers of unknown stream type", groups.discarded());
        }

        page.replace_widget(&render(&WidgetState::Rendered {
            title: matched.title.clone(),
            groups: groups.clone(),
        }));
        run.enter(RunState::Rendered);
        info!(
            "Rendered {} offers for '{}' on {}",
            groups.len(),
            matched.title,
            path
        );

        let dismiss = DismissControl::new(page, self.dismissals.clone(), path);
        run.finish(InjectionOutcome::Rendered {
            matched,
            groups,
            dismiss,
        })
    }
}
