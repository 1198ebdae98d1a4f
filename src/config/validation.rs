use crate::config::types::{Config, MonitorConfig, NavLocatorEntry, OutputConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_urls(&config.urls)?;
    validate_monitor_config(&config.monitor)?;
    validate_output_config(&config.output)?;
    validate_nav_locators(&config.nav_locators)?;
    Ok(())
}

/// Validates the monitored URL list
fn validate_urls(urls: &[String]) -> Result<(), ConfigError> {
    if urls.is_empty() {
        return Err(ConfigError::Validation(
            "urls must contain at least one URL to monitor".to_string(),
        ));
    }

    for url in urls {
        let parsed = Url::parse(url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid URL '{}': {}", url, e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "URL '{}' must use the http or https scheme",
                url
            )));
        }
    }

    Ok(())
}

/// Validates fetch and retention settings
fn validate_monitor_config(config: &MonitorConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.retention_days < 1 {
        return Err(ConfigError::Validation(format!(
            "retention_days must be >= 1, got {}",
            config.retention_days
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates navigation locator entries
///
/// Host patterns must be non-empty; selectors must parse as CSS selectors so
/// a bad entry fails at startup rather than silently matching nothing.
fn validate_nav_locators(locators: &[NavLocatorEntry]) -> Result<(), ConfigError> {
    for entry in locators {
        if entry.host_pattern.is_empty() {
            return Err(ConfigError::InvalidLocator(
                "host_pattern cannot be empty".to_string(),
            ));
        }

        if Selector::parse(&entry.selector).is_err() {
            return Err(ConfigError::InvalidLocator(format!(
                "selector '{}' is not a valid CSS selector",
                entry.selector
            )));
        }
    }

    Ok(())
}
