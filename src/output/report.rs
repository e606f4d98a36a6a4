//! Report types
//!
//! This module defines the report produced by a finished crawl and the
//! format it is rendered in.

use crate::output::stats::ReportStats;
use crate::state::PageResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// How a report is rendered
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable listing of dead links
    #[default]
    Text,
    /// Machine-readable JSON document
    Json,
    /// Markdown summary, e.g. for CI job summaries
    Markdown,
}

/// The outcome of one crawl run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// The normalized root URL
    pub root: Url,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Every checked URL, sorted by URL
    pub results: Vec<PageResult>,
}

impl CrawlReport {
    /// Creates a report; results are sorted by URL if they are not already
    pub fn new(
        root: Url,
        mut results: Vec<PageResult>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        results.sort_by(|a, b| a.url.cmp(&b.url));
        Self {
            root,
            started_at,
            finished_at,
            results,
        }
    }

    /// Iterates over the dead links in URL order
    pub fn dead_links(&self) -> impl Iterator<Item = &PageResult> {
        self.results.iter().filter(|r| r.is_dead())
    }

    pub fn has_dead_links(&self) -> bool {
        self.results.iter().any(|r| r.is_dead())
    }

    /// Number of distinct (page, dead link) pairs
    pub fn dead_references(&self) -> usize {
        self.dead_links().map(|r| r.referrers.len()).sum()
    }

    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    pub fn stats(&self) -> ReportStats {
        ReportStats::from_results(&self.results)
    }
}
