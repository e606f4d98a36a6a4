//! Outcome definitions for every checked URL
//!
//! This module defines what the crawler records about a URL once it has
//! been fetched, and how fetch outcomes map onto it.

use crate::crawler::{FetchError, FetchedPage};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use url::Url;

/// Result of checking a single URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageStatus {
    /// A response with a status below 400
    Ok { code: u16 },

    /// A response with an HTTP error status (>= 400)
    Error { code: u16 },

    /// No response at all (timeout, DNS or connection failure, redirect loop)
    Unreachable { reason: String },
}

impl PageStatus {
    /// Classifies a fetch outcome
    pub fn from_outcome(outcome: &Result<FetchedPage, FetchError>) -> Self {
        match outcome {
            Ok(page) => Self::from_code(page.status_code),
            Err(e) => Self::Unreachable {
                reason: e.to_string(),
            },
        }
    }

    /// Classifies a raw HTTP status code
    pub fn from_code(code: u16) -> Self {
        if code >= 400 {
            Self::Error { code }
        } else {
            Self::Ok { code }
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Returns true if this status is dead-link evidence
    pub fn is_dead(&self) -> bool {
        !self.is_ok()
    }

    /// HTTP status code, when a response arrived
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Ok { code } | Self::Error { code } => Some(*code),
            Self::Unreachable { .. } => None,
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok { code } | Self::Error { code } => write!(f, "HTTP {}", code),
            Self::Unreachable { reason } => write!(f, "unreachable ({})", reason),
        }
    }
}

/// Everything recorded about one normalized URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    /// The normalized URL
    pub url: Url,

    /// How the fetch went
    pub status: PageStatus,

    /// Pages that link to this URL (empty for the root)
    pub referrers: BTreeSet<Url>,

    /// Whether the URL was inside the crawl scope
    pub internal: bool,

    /// Link hops from the root
    pub depth: u32,

    /// Content-Type of the response, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Where the request ended up, when it was redirected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<Url>,
}

impl PageResult {
    pub fn is_dead(&self) -> bool {
        self.status.is_dead()
    }
}
