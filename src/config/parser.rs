use crate::config::types::Config;
use crate::config::validation::validate;
use crate::output::ReportFormat;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Settings given on the command line
///
/// Each `Some` field (or non-empty list) overrides the value from the config
/// file; exclude patterns are appended rather than replaced.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub timeout_secs: Option<f64>,
    pub max_depth: Option<u32>,
    pub concurrency: Option<usize>,
    pub user_agent: Option<String>,
    pub exclude: Vec<String>,
    pub internal_hosts: Vec<String>,
    pub format: Option<ReportFormat>,
    pub output_path: Option<String>,
}

impl Config {
    /// Applies command-line overrides and re-validates the result
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(timeout) = overrides.timeout_secs {
            self.crawler.timeout_secs = timeout;
        }
        if let Some(depth) = overrides.max_depth {
            self.crawler.max_depth = Some(depth);
        }
        if let Some(concurrency) = overrides.concurrency {
            self.crawler.concurrency = concurrency;
        }
        if let Some(user_agent) = overrides.user_agent {
            self.crawler.user_agent = user_agent;
        }
        self.scope.exclude.extend(overrides.exclude);
        self.scope.internal_hosts.extend(overrides.internal_hosts);
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if let Some(path) = overrides.output_path {
            self.output.path = Some(path);
        }

        validate(&self)?;
        Ok(self)
    }
}
