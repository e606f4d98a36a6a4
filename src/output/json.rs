//! JSON report serialization

use crate::output::report::CrawlReport;
use crate::output::stats::ReportStats;
use crate::state::PageResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// Document layout of a JSON report
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    root: &'a Url,
    started_at: &'a DateTime<Utc>,
    finished_at: &'a DateTime<Utc>,
    duration_seconds: f64,
    stats: ReportStats,
    dead_links: Vec<&'a PageResult>,
    results: &'a [PageResult],
}

/// Serializes a crawl report as pretty-printed JSON
///
/// `dead_links` repeats the failing entries of `results` so consumers do not
/// have to filter themselves.
pub fn format_json_report(report: &CrawlReport) -> Result<String, serde_json::Error> {
    let doc = JsonReport {
        root: &report.root,
        started_at: &report.started_at,
        finished_at: &report.finished_at,
        duration_seconds: report.duration_seconds(),
        stats: report.stats(),
        dead_links: report.dead_links().collect(),
        results: &report.results,
    };

    let mut json = serde_json::to_string_pretty(&doc)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PageStatus;
    use std::collections::BTreeSet;

    #[test]
    fn test_json_layout() {
        let base = Url::parse("https://example.com/").unwrap();
        let now = Utc::now();
        let report = CrawlReport::new(
            base.clone(),
            vec![
                PageResult {
                    url: base.clone(),
                    status: PageStatus::Ok { code: 200 },
                    referrers: BTreeSet::new(),
                    internal: true,
                    depth: 0,
                    content_type: Some("text/html".to_string()),
                    final_url: None,
                },
                PageResult {
                    url: base.join("/gone").unwrap(),
                    status: PageStatus::Error { code: 404 },
                    referrers: [base.clone()].into_iter().collect(),
                    internal: true,
                    depth: 1,
                    content_type: None,
                    final_url: None,
                },
            ],
            now,
            now,
        );

        let json = format_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["root"], "https://example.com/");
        assert_eq!(value["stats"]["total_checked"], 2);
        assert_eq!(value["stats"]["http_errors"], 1);
        assert_eq!(value["results"].as_array().unwrap().len(), 2);

        let dead = value["dead_links"].as_array().unwrap();
        assert_eq!(dead.len(), 1);
        assert_eq!(dead[0]["url"], "https://example.com/gone");
        assert_eq!(dead[0]["status"]["kind"], "error");
        assert_eq!(dead[0]["status"]["code"], 404);
        assert_eq!(dead[0]["referrers"][0], "https://example.com/");
        assert!(dead[0].get("content_type").is_none());
    }
}
