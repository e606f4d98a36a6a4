use crate::config::types::{Config, CrawlerConfig, ScopeConfig};
use crate::url::ExcludeList;
use crate::ConfigError;

const MAX_TIMEOUT_SECS: f64 = 600.0;
const MAX_CONCURRENCY: usize = 256;
const MAX_REDIRECTS: usize = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_scope_config(&config.scope)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if !config.timeout_secs.is_finite()
        || config.timeout_secs <= 0.0
        || config.timeout_secs > MAX_TIMEOUT_SECS
    {
        return Err(ConfigError::Validation(format!(
            "timeout must be greater than 0 and at most {}s, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    if config.max_redirects > MAX_REDIRECTS {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be at most {}, got {}",
            MAX_REDIRECTS, config.max_redirects
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates exclude regexes and internal host patterns
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    ExcludeList::new(&config.exclude)?;

    for pattern in &config.internal_hosts {
        validate_host_pattern(pattern)?;
    }

    Ok(())
}

/// Validates a host pattern (supports a leading "*." wildcard)
fn validate_host_pattern(pattern: &str) -> Result<(), ConfigError> {
    let host = pattern.strip_prefix("*.").unwrap_or(pattern);

    if host.is_empty() {
        return Err(ConfigError::InvalidPattern(format!(
            "host pattern '{}' is empty",
            pattern
        )));
    }

    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "host '{}' contains invalid characters",
            pattern
        )));
    }

    if host.starts_with('.')
        || host.ends_with('.')
        || host.starts_with('-')
        || host.ends_with('-')
        || host.contains("..")
    {
        return Err(ConfigError::InvalidPattern(format!(
            "host '{}' is malformed",
            pattern
        )));
    }

    Ok(())
}
