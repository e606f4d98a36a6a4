use url::Url;

/// Extracts the lowercase host from a URL
///
/// The port is not part of the result; see [`same_origin_host`] when the
/// port matters.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use checksite::url::extract_host;
///
/// let url = Url::parse("https://Docs.Example.com:8443/path").unwrap();
/// assert_eq!(extract_host(&url), Some("docs.example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when both URLs point at the same site
///
/// The scheme is ignored, so `http://example.com` and `https://example.com`
/// are one site. Explicit ports must match: a dev server on `:3000` is not the
/// same site as one on `:4000`. Default ports are never explicit, since `url`
/// drops them while parsing.
pub fn same_origin_host(a: &Url, b: &Url) -> bool {
    extract_host(a) == extract_host(b) && a.port() == b.port()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_extract_simple_host() {
        assert_eq!(
            extract_host(&parse("https://example.com/")),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_ignores_port() {
        assert_eq!(
            extract_host(&parse("http://localhost:8000/")),
            Some("localhost".to_string())
        );
    }

    #[test]
    fn test_same_host_different_paths() {
        assert!(same_origin_host(
            &parse("https://example.com/a"),
            &parse("https://example.com/b/c")
        ));
    }

    #[test]
    fn test_default_port_is_same_host() {
        assert!(same_origin_host(
            &parse("http://example.com/"),
            &parse("http://example.com:80/")
        ));
    }

    #[test]
    fn test_scheme_is_ignored() {
        assert!(same_origin_host(
            &parse("http://example.com/"),
            &parse("https://example.com/docs")
        ));
        assert!(same_origin_host(
            &parse("https://example.com:443/"),
            &parse("http://example.com/")
        ));
    }

    #[test]
    fn test_explicit_port_differs_from_default() {
        assert!(!same_origin_host(
            &parse("http://example.com:8080/"),
            &parse("https://example.com/")
        ));
    }

    #[test]
    fn test_different_port_is_different_host() {
        assert!(!same_origin_host(
            &parse("http://127.0.0.1:3000/"),
            &parse("http://127.0.0.1:4000/")
        ));
    }

    #[test]
    fn test_subdomain_is_different_host() {
        assert!(!same_origin_host(
            &parse("https://example.com/"),
            &parse("https://blog.example.com/")
        ));
    }
}
