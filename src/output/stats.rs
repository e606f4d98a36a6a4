//! Summary statistics for a crawl report

use crate::state::{PageResult, PageStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters derived from a report's results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    /// Total number of URLs checked
    pub total_checked: u64,

    /// URLs inside the crawl scope
    pub internal: u64,

    /// URLs outside the crawl scope (checked, not crawled)
    pub external: u64,

    pub ok: u64,
    pub http_errors: u64,
    pub unreachable: u64,

    /// Number of results per HTTP status code
    pub status_codes: BTreeMap<u16, u64>,
}

impl ReportStats {
    /// Tallies a slice of results
    pub fn from_results(results: &[PageResult]) -> Self {
        let mut stats = Self::default();

        for result in results {
            stats.total_checked += 1;
            if result.internal {
                stats.internal += 1;
            } else {
                stats.external += 1;
            }

            match &result.status {
                PageStatus::Ok { .. } => stats.ok += 1,
                PageStatus::Error { .. } => stats.http_errors += 1,
                PageStatus::Unreachable { .. } => stats.unreachable += 1,
            }

            if let Some(code) = result.status.code() {
                *stats.status_codes.entry(code).or_insert(0) += 1;
            }
        }

        stats
    }

    pub fn dead(&self) -> u64 {
        self.http_errors + self.unreachable
    }

    /// Returns the share of healthy links as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_checked == 0 {
            return 0.0;
        }
        (self.ok as f64 / self.total_checked as f64) * 100.0
    }
}
