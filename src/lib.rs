//! orgtree: an organizational directory mapper
//!
//! This crate crawls a hierarchical public directory of organizational units
//! (branches, subcategories, units and subunits rendered as nested HTML lists)
//! and rebuilds it as a typed tree, which is then written out as JSON together
//! with aggregate statistics.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod tree;
pub mod url;

use thiserror::Error;

/// Main error type for orgtree operations
#[derive(Debug, Error)]
pub enum OrgTreeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Result type alias for orgtree operations
pub type Result<T> = std::result::Result<T, OrgTreeError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlReport, FetchError, PageFetcher, TreeWalker};
pub use output::{aggregate, TreeStats};
pub use state::TraversalContext;
pub use tree::{NodeKind, OrgNode, UnitMetadata};
