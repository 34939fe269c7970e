pub mod adapters;
pub mod catalog;
pub mod config;
pub mod dismissal;
pub mod grouping;
pub mod logging;
pub mod matcher;
pub mod metrics;
pub mod orchestrator;
pub mod page;
pub mod popup;
pub mod testing;
pub mod widget;

pub use adapters::{AdapterRegistry, ProbeSignal, SiteAdapter};
pub use catalog::{
    AvailabilityApi, AvailabilityOffer, CatalogError, ContentType, FailureKind, SearchCandidate,
    StreamGuideClient, StreamGuideConfig, StreamType, TitleId,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError,
    UnknownStreamTypePolicy,
};
pub use dismissal::{DismissalStore, KeyValueStore, MemoryKvStore, SqliteKvStore, StoreError};
pub use grouping::{group, group_with, GroupedOffers};
pub use matcher::select_best_match;
pub use orchestrator::{
    InjectionOrchestrator, InjectionOutcome, InjectionReport, RunState, SkipReason,
};
pub use page::{Anchor, HostPage, PageDocument, StaticPage};
pub use popup::{ActiveTab, PopupController, PopupState, TabError};
pub use widget::{render, WidgetState};
