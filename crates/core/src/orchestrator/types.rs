//! Types for the injection orchestrator.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::catalog::{FailureKind, SearchCandidate};
use crate::dismissal::{DismissalStore, StoreError};
use crate::grouping::GroupedOffers;
use crate::page::HostPage;

/// States of one injection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Checking,
    Skipped,
    Loading,
    Rendered,
    Failed,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Checking => "checking",
            RunState::Skipped => "skipped",
            RunState::Loading => "loading",
            RunState::Rendered => "rendered",
            RunState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Skipped | RunState::Rendered | RunState::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a run ended without showing a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A widget container is already on the page.
    AlreadyInjected,
    /// No adapter for the host, or the adapter rejected the page.
    Ineligible,
    /// The user hid the widget on this path.
    Dismissed,
    /// No title could be derived from the page.
    NoTitle,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::AlreadyInjected => "already_injected",
            SkipReason::Ineligible => "ineligible",
            SkipReason::Dismissed => "dismissed",
            SkipReason::NoTitle => "no_title",
        }
    }

    /// Failure category this skip is reported under, if any.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            SkipReason::Ineligible => Some(FailureKind::Ineligible),
            SkipReason::NoTitle => Some(FailureKind::ExtractionFailure),
            SkipReason::AlreadyInjected | SkipReason::Dismissed => None,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The close control of a rendered widget.
#[derive(Clone)]
pub struct DismissControl {
    page: Arc<dyn HostPage>,
    dismissals: DismissalStore,
    path: String,
}

impl DismissControl {
    pub(crate) fn new(page: Arc<dyn HostPage>, dismissals: DismissalStore, path: String) -> Self {
        Self {
            page,
            dismissals,
            path,
        }
    }

    /// Page path the dismissal is recorded under.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Minimize the widget and remember the choice for this path. The
    /// container stays on the page.
    pub fn dismiss(&self) -> Result<(), StoreError> {
        info!("Widget dismissed on '{}'", self.path);
        self.page.minimize_widget();
        self.dismissals.set_dismissed(&self.path)
    }
}

impl fmt::Debug for DismissControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissControl")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// How a run ended.
#[derive(Debug, Clone)]
pub enum InjectionOutcome {
    Skipped(SkipReason),
    Rendered {
        matched: SearchCandidate,
        groups: GroupedOffers,
        dismiss: DismissControl,
    },
    Failed(FailureKind),
}

impl InjectionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            InjectionOutcome::Skipped(_) => "skipped",
            InjectionOutcome::Rendered { .. } => "rendered",
            InjectionOutcome::Failed(_) => "failed",
        }
    }
}

/// Result of one run: every state visited, in order, plus the outcome.
#[derive(Debug, Clone)]
pub struct InjectionReport {
    pub transitions: Vec<RunState>,
    pub outcome: InjectionOutcome,
}

impl InjectionReport {
    pub fn final_state(&self) -> RunState {
        self.transitions.last().copied().unwrap_or(RunState::Idle)
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match &self.outcome {
            InjectionOutcome::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }

    pub fn dismiss_control(&self) -> Option<&DismissControl> {
        match &self.outcome {
            InjectionOutcome::Rendered { dismiss, .. } => Some(dismiss),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!RunState::Idle.is_terminal());
        assert!(!RunState::Loading.is_terminal());
        assert!(RunState::Skipped.is_terminal());
        assert!(RunState::Rendered.is_terminal());
        assert!(RunState::Failed.is_terminal());
    }

    #[test]
    fn test_skip_reason_failure_kinds() {
        assert_eq!(
            SkipReason::NoTitle.failure_kind(),
            Some(FailureKind::ExtractionFailure)
        );
        assert_eq!(
            SkipReason::Ineligible.failure_kind(),
            Some(FailureKind::Ineligible)
        );
        assert_eq!(SkipReason::Dismissed.failure_kind(), None);
    }
}
