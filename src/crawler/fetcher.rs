//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with timeout, user agent and redirect policy
//! - GET requests for pages that may be expanded
//! - HEAD requests (with GET fallback) for links that are only checked
//! - Error classification

use crate::config::CrawlerConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, Method, StatusCode};
use thiserror::Error;
use url::Url;

/// Content types whose body is read and searched for links
const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// How a URL should be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    /// Full GET; the body is returned when the response is HTML
    Get,
    /// Status-only check; falls back to GET when HEAD is not supported
    Head,
}

/// A response that arrived, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL of the final response after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value, if any
    pub content_type: Option<String>,

    /// Page body; only present for successful GETs of HTML documents
    pub body: Option<String>,
}

impl FetchedPage {
    /// Returns true if the Content-Type denotes an HTML document
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(is_html_content_type)
            .unwrap_or(false)
    }
}

/// A request that produced no response
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("{0}")]
    Other(String),
}

/// Source of HTTP responses for the crawler
///
/// The production implementation is [`HttpFetcher`]; tests substitute an
/// in-memory site.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url, method: FetchMethod) -> Result<FetchedPage, FetchError>;
}

/// Fetcher backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    async fn request(&self, url: &Url, method: Method) -> Result<reqwest::Response, FetchError> {
        self.client
            .request(method, url.clone())
            .send()
            .await
            .map_err(classify_error)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, method: FetchMethod) -> Result<FetchedPage, FetchError> {
        let response = match method {
            FetchMethod::Get => self.request(url, Method::GET).await?,
            FetchMethod::Head => {
                let response = self.request(url, Method::HEAD).await?;
                if head_unsupported(response.status()) {
                    tracing::debug!("HEAD not supported by {}, retrying with GET", url);
                    self.request(url, Method::GET).await?
                } else {
                    response
                }
            }
        };

        let status = response.status();
        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let wants_body = method == FetchMethod::Get
            && status.is_success()
            && content_type.as_deref().map(is_html_content_type).unwrap_or(false);

        let body = if wants_body {
            Some(response.text().await.map_err(classify_error)?)
        } else {
            None
        };

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        })
    }
}

/// Builds an HTTP client with the configured timeout and user agent
///
/// Redirects are followed up to `max_redirects` hops; a longer chain
/// surfaces as a [`FetchError::Other`].
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let redirect = if config.max_redirects == 0 {
        Policy::none()
    } else {
        Policy::limited(config.max_redirects)
    };

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .connect_timeout(config.timeout())
        .redirect(redirect)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Servers that reject HEAD outright; the link may still be fine
fn head_unsupported(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
    )
}

fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    HTML_CONTENT_TYPES.contains(&mime.as_str())
}

/// Maps a reqwest error onto the three failure kinds the crawler reports
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connection(root_cause(&e))
    } else if e.is_redirect() {
        FetchError::Other("too many redirects".to_string())
    } else {
        FetchError::Other(root_cause(&e))
    }
}

/// Innermost error message; reqwest's own Display repeats the URL
fn root_cause(e: &(dyn std::error::Error + 'static)) -> String {
    let mut current = e;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
