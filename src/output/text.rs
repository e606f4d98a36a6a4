//! Plain-text report for terminals and CI logs

use crate::output::report::CrawlReport;
use std::fmt::Write;

/// Formats a crawl report as plain text
///
/// Every dead link is listed with its status and the pages referencing it,
/// followed by a one-line summary.
pub fn format_text_report(report: &CrawlReport) -> String {
    let stats = report.stats();
    let mut out = String::new();

    if !report.has_dead_links() {
        let _ = writeln!(out, "All {} links OK!", stats.total_checked);
        return out;
    }

    let _ = writeln!(out, "Problematic links found:");
    for dead in report.dead_links() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}  [{}]", dead.url, dead.status);
        if let Some(final_url) = &dead.final_url {
            let _ = writeln!(out, "    redirected to {}", final_url);
        }
        for referrer in &dead.referrers {
            let _ = writeln!(out, "    linked from {}", referrer);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "In total {}/{} links were invalid ({} HTTP error(s), {} unreachable).",
        stats.dead(),
        stats.total_checked,
        stats.http_errors,
        stats.unreachable
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PageResult, PageStatus};
    use chrono::Utc;
    use std::collections::BTreeSet;
    use url::Url;

    fn page(path: &str, status: PageStatus, referrers: &[&str]) -> PageResult {
        let base = Url::parse("https://example.com/").unwrap();
        PageResult {
            url: base.join(path).unwrap(),
            status,
            referrers: referrers
                .iter()
                .map(|r| base.join(r).unwrap())
                .collect::<BTreeSet<_>>(),
            internal: true,
            depth: 1,
            content_type: None,
            final_url: None,
        }
    }

    fn report(results: Vec<PageResult>) -> CrawlReport {
        let now = Utc::now();
        CrawlReport::new(Url::parse("https://example.com/").unwrap(), results, now, now)
    }

    #[test]
    fn test_all_ok() {
        let text = format_text_report(&report(vec![
            page("/", PageStatus::Ok { code: 200 }, &[]),
            page("/a", PageStatus::Ok { code: 200 }, &["/"]),
        ]));
        assert_eq!(text, "All 2 links OK!\n");
    }

    #[test]
    fn test_dead_links_listed_with_referrers() {
        let text = format_text_report(&report(vec![
            page("/", PageStatus::Ok { code: 200 }, &[]),
            page("/gone", PageStatus::Error { code: 404 }, &["/", "/about"]),
            page(
                "/down",
                PageStatus::Unreachable {
                    reason: "request timed out".to_string(),
                },
                &["/about"],
            ),
        ]));

        assert!(text.starts_with("Problematic links found:\n"));
        assert!(text.contains("  https://example.com/gone  [HTTP 404]\n"));
        assert!(text.contains("    linked from https://example.com/\n"));
        assert!(text.contains("    linked from https://example.com/about\n"));
        assert!(text.contains("https://example.com/down  [unreachable (request timed out)]"));
        assert!(text.contains("In total 2/3 links were invalid (1 HTTP error(s), 1 unreachable)."));

        // Sorted by URL
        let down = text.find("/down").unwrap();
        let gone = text.find("/gone").unwrap();
        assert!(down < gone);
    }

    #[test]
    fn test_redirect_target_shown() {
        let mut dead = page("/old", PageStatus::Error { code: 404 }, &["/"]);
        dead.final_url = Some(Url::parse("https://example.com/new").unwrap());
        let text = format_text_report(&report(vec![dead]));
        assert!(text.contains("    redirected to https://example.com/new\n"));
    }
}
