//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! summary record describing a finished crawl.

use crate::output::stats::TreeStats;
use crate::tree::OrgNode;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Summary of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    // Run metadata
    pub entry_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config_hash: String,

    // Counts
    pub stats: TreeStats,
    pub visited_urls: usize,
    pub requests: u64,
    pub failed_requests: u64,

    // Where the tree was written
    pub output_paths: Vec<PathBuf>,
}

impl CrawlSummary {
    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds().max(0)
    }

    /// Share of requests that returned a usable page, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        let succeeded = self.requests.saturating_sub(self.failed_requests);
        (succeeded as f64 / self.requests as f64) * 100.0
    }
}

/// Trait for tree writers
///
/// Implementations persist a complete organizational tree to a destination.
pub trait OutputHandler {
    /// Writes the tree to `destination`, replacing any existing content
    ///
    /// # Arguments
    ///
    /// * `tree` - The main branches, in document order
    /// * `destination` - File to write
    fn write_tree(&self, tree: &[OrgNode], destination: &Path) -> OutputResult<()>;
}
