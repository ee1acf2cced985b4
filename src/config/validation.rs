use crate::config::types::{CatalogConfig, Config, CrawlerConfig, HttpConfig, SelectorConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_http_config(&config.http)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_selectors(&config.selectors)?;
    Ok(())
}

/// Validates the catalog location and query dialect
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.query().is_some() {
        return Err(ConfigError::InvalidUrl(
            "base-url must not carry a query string; use [catalog.query]".to_string(),
        ));
    }

    // The category is appended verbatim
    if !config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url must end with '/', got '{}'",
            config.base_url
        )));
    }

    if config.category.trim().is_empty() {
        return Err(ConfigError::Validation(
            "category cannot be empty".to_string(),
        ));
    }

    if config.offset_param.is_empty() {
        return Err(ConfigError::Validation(
            "offset-param cannot be empty".to_string(),
        ));
    }

    for param in &config.query {
        if param.key.is_empty() {
            return Err(ConfigError::Validation(
                "query parameter keys cannot be empty".to_string(),
            ));
        }

        if param.key == config.offset_param {
            return Err(ConfigError::Validation(format!(
                "query parameter '{}' collides with offset-param",
                param.key
            )));
        }
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates crawl loop settings
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output settings
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output path cannot be empty; omit it to write to stdout".to_string(),
            ));
        }
    }

    Ok(())
}

/// Checks that every selector compiles
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for selector in [
        &config.item,
        &config.chart,
        &config.name,
        &config.link,
        &config.price,
        &config.score,
    ] {
        compile_selector(selector)?;
    }

    Ok(())
}

/// Parses a single CSS selector, mapping failures to a config error
pub(crate) fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
