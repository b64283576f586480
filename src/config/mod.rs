//! Configuration module for orgtree
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults that describe the public unit directory the crawler
//! was written for, so a configuration file is only needed to override them.
//!
//! # Example
//!
//! ```no_run
//! use orgtree::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("orgtree.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, PacingConfig, SelectorConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
