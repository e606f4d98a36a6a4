//! HTML link extractor
//!
//! This module handles parsing HTML content to extract:
//! - Hyperlink targets (from `<a>` and `<area>` tags)
//! - The document base URL (`<base href>`)
//! - Page title

use crate::url::canonicalize;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from `<title>` tag)
    pub title: Option<String>,

    /// Normalized absolute link targets, deduplicated and sorted
    pub links: BTreeSet<Url>,
}

/// Parses HTML content and extracts links and metadata
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` and `<area href="...">`
///
/// **Exclude:**
/// - Empty and fragment-only hrefs (same page anchors)
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Anything that is not http(s) after resolution
///
/// Relative hrefs are resolved against `<base href>` when the document has
/// one, otherwise against `base_url`.
///
/// # Example
///
/// ```
/// use checksite::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page#x">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert!(parsed.links.contains(&Url::parse("https://example.com/page").unwrap()));
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    let base = document_base(&document, base_url);
    let title = extract_title(&document);
    let links = collect_links(&document, &base);

    ParsedPage { title, links }
}

/// Extracts the set of absolute link targets from an HTML body
///
/// # Arguments
///
/// * `body` - The HTML content
/// * `base_url` - The URL the body was served from
pub fn extract_links(body: &str, base_url: &Url) -> BTreeSet<Url> {
    parse_html(body, base_url).links
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::error!("Invalid selector {}: {:?}", css, e);
            None
        }
    }
}

/// Resolves the effective base URL of the document
fn document_base(document: &Html, page_url: &Url) -> Url {
    selector("base[href]")
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .and_then(|el| el.value().attr("href"))
                .and_then(|href| page_url.join(href.trim()).ok())
        })
        .unwrap_or_else(|| page_url.clone())
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = selector("title")?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn collect_links(document: &Html, base: &Url) -> BTreeSet<Url> {
    let mut links = BTreeSet::new();

    if let Some(link_selector) = selector("a[href], area[href]") {
        for element in document.select(&link_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(url) = resolve_link(href, base) {
                    links.insert(url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to a normalized absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes and data: URIs
/// - Fragment-only and empty hrefs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(absolute) => match canonicalize(absolute) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::trace!("Skipping link {} on {}: {}", href, base, e);
                None
            }
        },
        Err(e) => {
            tracing::debug!("Unparsable link {} on {}: {}", href, base, e);
            None
        }
    }
}
