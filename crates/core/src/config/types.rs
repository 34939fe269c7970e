use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub popup: PopupConfig,
    #[serde(default)]
    pub dismissal: DismissalConfig,
    #[serde(default)]
    pub grouping: GroupingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote catalog/availability service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Service root, without the `/v1` segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. A call that exceeds it is a failure.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Country code used when listing trending services.
    #[serde(default = "default_country")]
    pub country: String,
    /// Number of trending titles requested by the popup.
    #[serde(default = "default_trending_limit")]
    pub trending_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            country: default_country(),
            trending_limit: default_trending_limit(),
        }
    }
}

fn default_base_url() -> String {
    "https://streamguide-api.onrender.com".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_country() -> String {
    "US".to_string()
}

fn default_trending_limit() -> u32 {
    10
}

/// Popup search behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PopupConfig {
    /// Idle window after the last keystroke before a search is sent.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
    /// Queries shorter than this (after trimming) clear the results instead.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    /// Maximum number of search results listed.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
            min_query_chars: default_min_query_chars(),
            max_results: default_max_results(),
        }
    }
}

fn default_debounce() -> u64 {
    300
}

fn default_min_query_chars() -> usize {
    2
}

fn default_max_results() -> usize {
    5
}

/// Dismissal persistence
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DismissalConfig {
    /// Prefix prepended to the page path to build the storage key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// SQLite file backing the store. In-memory when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

impl Default for DismissalConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            database: None,
        }
    }
}

fn default_key_prefix() -> String {
    "streamguide-minimized-".to_string()
}

/// What the grouper does with an offer whose stream type is not one of the
/// five known buckets.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnknownStreamTypePolicy {
    /// Place it in the subscription bucket.
    #[default]
    Subscription,
    /// Drop it.
    Discard,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GroupingConfig {
    #[serde(default)]
    pub unknown_stream_type: UnknownStreamTypePolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive, overridden by `RUST_LOG`.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}
