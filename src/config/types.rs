use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for checksite
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub scope: ScopeConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: f64,

    /// Maximum link hops from the root to expand (None = unlimited)
    pub max_depth: Option<u32>,

    /// Maximum number of fetches in flight
    pub concurrency: usize,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Maximum number of redirects followed per request
    pub max_redirects: usize,
}

impl CrawlerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5.0,
            max_depth: None,
            concurrency: 8,
            user_agent: format!("checksite/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
        }
    }
}

/// Which links are crawled, checked, or ignored
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScopeConfig {
    /// Regex patterns; matching links are ignored entirely
    pub exclude: Vec<String>,

    /// Host patterns (e.g. "*.example.com") crawled as internal in addition
    /// to the root's own host
    pub internal_hosts: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    pub format: crate::output::ReportFormat,

    /// Write the report here instead of stdout
    pub path: Option<String>,
}
