/// Checks if a host matches a configured host pattern
///
/// Two kinds of pattern are supported:
/// 1. Exact: "docs.example.com" matches only "docs.example.com"
/// 2. Wildcard: "*.example.com" matches "example.com" itself and any
///    subdomain of it, at any depth
///
/// Comparison is case-insensitive.
///
/// # Examples
///
/// ```
/// use checksite::url::host_matches;
///
/// assert!(host_matches("example.com", "EXAMPLE.com"));
/// assert!(host_matches("*.example.com", "example.com"));
/// assert!(host_matches("*.example.com", "cdn.assets.example.com"));
/// assert!(!host_matches("*.example.com", "notexample.com"));
/// ```
pub fn host_matches(pattern: &str, host: &str) -> bool {
    let pattern = pattern.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    match pattern.strip_prefix("*.") {
        Some(base) => host == base || host.ends_with(&format!(".{}", base)),
        None => host == pattern,
    }
}
