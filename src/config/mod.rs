//! Configuration module for checksite
//!
//! Settings come from an optional TOML file and from the command line; the
//! command line wins.
//!
//! # Example
//!
//! ```no_run
//! use checksite::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("checksite.toml")).unwrap();
//! println!("Request timeout: {:?}", config.crawler.timeout());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, ScopeConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config, Overrides};
pub use validation::validate;
