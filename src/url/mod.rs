//! URL handling module for checksite
//!
//! This module provides URL normalization, host extraction, host pattern
//! matching, and the scope rules that decide which links get crawled.

mod domain;
mod matcher;
mod normalize;

use crate::config::ScopeConfig;
use crate::ConfigError;
use regex::Regex;
use url::Url;

// Re-export main functions
pub use domain::{extract_host, same_origin_host};
pub use matcher::host_matches;
pub use normalize::{canonicalize, normalize_url};

/// Decides whether a discovered URL is eligible for further crawling
///
/// Links outside the scope are still checked once, they are just never
/// expanded. Any `Fn(&Url) -> bool` closure is a scope predicate.
pub trait ScopePredicate: Send + Sync {
    /// Returns true if the URL should be fetched as a page and expanded
    fn in_scope(&self, url: &Url) -> bool;
}

impl<F> ScopePredicate for F
where
    F: Fn(&Url) -> bool + Send + Sync,
{
    fn in_scope(&self, url: &Url) -> bool {
        self(url)
    }
}

/// The default scope: same host (and port) as the root URL
///
/// Additional host patterns (see [`host_matches`]) can be declared internal,
/// e.g. to treat `www.example.com` and `example.com` as one site.
#[derive(Debug, Clone)]
pub struct SameHost {
    root: Url,
    extra_hosts: Vec<String>,
}

impl SameHost {
    /// Creates a scope restricted to the root's host
    pub fn new(root: &Url) -> Self {
        Self {
            root: root.clone(),
            extra_hosts: Vec::new(),
        }
    }

    /// Adds host patterns that count as internal too
    pub fn with_extra_hosts(mut self, patterns: impl IntoIterator<Item = String>) -> Self {
        self.extra_hosts.extend(patterns);
        self
    }
}

impl ScopePredicate for SameHost {
    fn in_scope(&self, url: &Url) -> bool {
        if same_origin_host(&self.root, url) {
            return true;
        }

        match url.host_str() {
            Some(host) => self
                .extra_hosts
                .iter()
                .any(|pattern| host_matches(pattern, host)),
            None => false,
        }
    }
}

/// Regex patterns for links that are ignored entirely
///
/// An excluded link is neither fetched nor reported. Patterns are matched
/// anywhere in the normalized URL (unanchored search).
#[derive(Debug, Clone, Default)]
pub struct ExcludeList {
    patterns: Vec<Regex>,
}

impl ExcludeList {
    /// Compiles the given patterns
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|source| ConfigError::InvalidExclude {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if any pattern matches the URL
    pub fn is_excluded(&self, url: &Url) -> bool {
        self.patterns.iter().any(|re| re.is_match(url.as_str()))
    }
}

/// How the crawler treats a discovered link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    /// Inside the scope - fetched and, if HTML, expanded
    Internal,
    /// Outside the scope - checked once, never expanded
    External,
    /// Matches an exclude pattern - ignored
    Excluded,
}

impl LinkClass {
    /// Returns true if the link should be fetched at all
    pub fn should_check(&self) -> bool {
        !matches!(self, Self::Excluded)
    }

    /// Returns true if the link's page may be expanded
    pub fn should_expand(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Classifies a normalized link
///
/// Exclusion takes priority over scope, so a pattern can silence an internal
/// section of the site as well as an external host.
pub fn classify_link(url: &Url, scope: &dyn ScopePredicate, exclude: &ExcludeList) -> LinkClass {
    if exclude.is_excluded(url) {
        return LinkClass::Excluded;
    }

    if scope.in_scope(url) {
        LinkClass::Internal
    } else {
        LinkClass::External
    }
}

/// Builds the exclude list and default scope described by a config section
pub fn scope_from_config(root: &Url, config: &ScopeConfig) -> Result<(SameHost, ExcludeList), ConfigError> {
    let scope = SameHost::new(root).with_extra_hosts(config.internal_hosts.iter().cloned());
    let exclude = ExcludeList::new(&config.exclude)?;
    Ok((scope, exclude))
}
