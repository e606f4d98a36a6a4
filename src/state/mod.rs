//! State module for a single crawl run
//!
//! # Components
//!
//! - `PageStatus` / `PageResult`: what was learned about each checked URL
//! - `CrawlState`: the frontier, visited-set and results of one run

mod crawl_state;
mod page_state;

// Re-export main types
pub use crawl_state::{CrawlState, QueuedUrl};
pub use page_state::{PageResult, PageStatus};
