use url::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - API base URL is an absolute http(s) URL
/// - Request timeout is not 0
/// - Popup query length and result limits are not 0
/// - Dismissal key prefix is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base = Url::parse(&config.api.base_url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "api.base_url '{}' is not a valid URL: {}",
            config.api.base_url, e
        ))
    })?;
    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::ValidationError(format!(
            "api.base_url must use http or https, got '{}'",
            base.scheme()
        )));
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "api.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.popup.min_query_chars == 0 {
        return Err(ConfigError::ValidationError(
            "popup.min_query_chars cannot be 0".to_string(),
        ));
    }

    if config.popup.max_results == 0 {
        return Err(ConfigError::ValidationError(
            "popup.max_results cannot be 0".to_string(),
        ));
    }

    if config.dismissal.key_prefix.is_empty() {
        return Err(ConfigError::ValidationError(
            "dismissal.key_prefix cannot be empty".to_string(),
        ));
    }

    Ok(())
}
