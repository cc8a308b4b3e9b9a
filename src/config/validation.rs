use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the crawled site
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", config.base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if config.category_slug.trim().is_empty() {
        return Err(ConfigError::Validation(
            "category_slug cannot be empty".to_string(),
        ));
    }

    if config.category_slug.contains(['/', '?', '#']) {
        return Err(ConfigError::Validation(format!(
            "category_slug must be a single path segment, got '{}'",
            config.category_slug
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.first_page < 1 {
        return Err(ConfigError::Validation(format!(
            "first_page must be >= 1, got {}",
            config.first_page
        )));
    }

    if config.last_page < config.first_page {
        return Err(ConfigError::Validation(format!(
            "last_page ({}) must not be lower than first_page ({})",
            config.last_page, config.first_page
        )));
    }

    if config.page_load_timeout_secs < 1 || config.selector_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "page_load_timeout_secs and selector_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.item_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "item_attempts must be >= 1, got {}",
            config.item_attempts
        )));
    }

    if config.max_scroll_rounds < 1 {
        return Err(ConfigError::Validation(format!(
            "max_scroll_rounds must be >= 1, got {}",
            config.max_scroll_rounds
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.basename.trim().is_empty() {
        return Err(ConfigError::Validation(
            "basename cannot be empty".to_string(),
        ));
    }

    if config.basename.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "basename must not contain path separators, got '{}'",
            config.basename
        )));
    }

    Ok(())
}
