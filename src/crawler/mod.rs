//! Crawler module for fetching pages and checking links
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and error classification
//! - HTML parsing and link extraction
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, FetchError, FetchMethod, FetchedPage, Fetcher, HttpFetcher};
pub use parser::{extract_links, parse_html, ParsedPage};

use crate::config::{validate, Config};
use crate::output::CrawlReport;
use crate::url::{normalize_url, scope_from_config};
use crate::CheckError;
use chrono::Utc;

/// Runs a complete site check
///
/// This is the main entry point for a check. It will:
/// 1. Validate the configuration, then normalize and validate the root URL
/// 2. Build the scope, exclude list and HTTP client from the config
/// 3. Crawl the site
/// 4. Wrap the results in a timed report
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `root` - The root URL as given by the user
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed; the report may contain dead links
/// * `Err(CheckError)` - The root URL is invalid or unavailable, or the
///   configuration could not be applied
///
/// # Example
///
/// ```no_run
/// use checksite::config::Config;
/// use checksite::crawler::check_site;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = check_site(&Config::default(), "https://example.com/").await?;
/// println!("{} dead link(s)", report.dead_links().count());
/// # Ok(())
/// # }
/// ```
pub async fn check_site(config: &Config, root: &str) -> Result<CrawlReport, CheckError> {
    validate(config)?;

    let root_url = normalize_url(root).map_err(|source| CheckError::InvalidRoot {
        url: root.to_string(),
        source,
    })?;

    let (scope, exclude) = scope_from_config(&root_url, &config.scope)?;
    let crawler = Crawler::from_config(&config.crawler, exclude)?;

    let started_at = Utc::now();
    let results = crawler.crawl(&root_url, &scope).await?;
    let finished_at = Utc::now();

    Ok(CrawlReport::new(root_url, results, started_at, finished_at))
}
