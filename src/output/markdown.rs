//! Markdown report generation
//!
//! Produces a summary suitable for CI job summaries or pull request comments:
//! run information, overall statistics, and a table of dead links with the
//! pages that reference them.

use crate::output::report::CrawlReport;

/// Formats a crawl report as markdown
///
/// # Arguments
///
/// * `report` - The finished crawl report
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(report: &CrawlReport) -> String {
    let stats = report.stats();
    let mut md = String::new();

    // Title
    md.push_str("# Dead Link Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Root**: {}\n", report.root));
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        report.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n\n",
        report.duration_seconds()
    ));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Links Checked**: {}\n", stats.total_checked));
    md.push_str(&format!("- **Internal**: {}\n", stats.internal));
    md.push_str(&format!("- **External**: {}\n", stats.external));
    md.push_str(&format!("- **Dead**: {}\n", stats.dead()));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    // Status code breakdown
    if !stats.status_codes.is_empty() {
        md.push_str("## Status Codes\n\n");
        md.push_str("| Status | Count |\n");
        md.push_str("|--------|-------|\n");
        for (code, count) in &stats.status_codes {
            md.push_str(&format!("| {} | {} |\n", code, count));
        }
        if stats.unreachable > 0 {
            md.push_str(&format!("| unreachable | {} |\n", stats.unreachable));
        }
        md.push('\n');
    }

    // Dead links
    md.push_str("## Dead Links\n\n");
    if !report.has_dead_links() {
        md.push_str(&format!(
            "All {} links OK! :white_check_mark:\n",
            stats.total_checked
        ));
        return md;
    }

    md.push_str("| Link | Status | Linked From |\n");
    md.push_str("|------|--------|-------------|\n");
    for dead in report.dead_links() {
        let referrers = dead
            .referrers
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join("<br>");
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(dead.url.as_str()),
            escape_cell(&dead.status.to_string()),
            escape_cell(&referrers)
        ));
    }
    md.push('\n');

    md.push_str(&format!(
        "In total {}/{} links were invalid.\n",
        stats.dead(),
        stats.total_checked
    ));

    md
}

/// Escapes characters that would break a table cell
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PageResult, PageStatus};
    use chrono::Utc;
    use std::collections::BTreeSet;
    use url::Url;

    fn report(results: Vec<PageResult>) -> CrawlReport {
        let now = Utc::now();
        CrawlReport::new(Url::parse("https://example.com/").unwrap(), results, now, now)
    }

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

    #[test]
    fn test_clean_report() {
        let md = format_markdown_report(&report(vec![page(
            "/",
            PageStatus::Ok { code: 200 },
            &[],
        )]));

        assert!(md.contains("# Dead Link Report"));
        assert!(md.contains("- **Root**: https://example.com/"));
        assert!(md.contains("All 1 links OK!"));
        assert!(!md.contains("| Link | Status |"));
    }

    #[test]
    fn test_dead_link_table() {
        let md = format_markdown_report(&report(vec![
            page("/", PageStatus::Ok { code: 200 }, &[]),
            page("/gone", PageStatus::Error { code: 404 }, &["/", "/about"]),
        ]));

        assert!(md.contains(
            "| https://example.com/gone | HTTP 404 | https://example.com/<br>https://example.com/about |"
        ));
        assert!(md.contains("| 404 | 1 |"));
        assert!(md.contains("In total 1/2 links were invalid."));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("a\nb"), "a b");
    }
}
