//! Crawler module for page fetching and tree extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`PageFetcher`] seam
//! - HTML parsing and selector-driven link extraction
//! - Structure classification and metadata extraction
//! - The recursive [`TreeWalker`] and its request pacing

mod classifier;
mod document;
mod extract;
mod fetcher;
mod pacing;
mod rules;
mod walker;

pub use classifier::{classify, is_nested, Structure};
pub use document::{Document, Link};
pub use extract::extract_metadata;
pub use fetcher::{build_http_client, fetch_url, FetchError, HttpFetcher, PageFetcher};
pub use pacing::Pacing;
pub use rules::ExtractionRules;
pub use walker::{TreeWalker, DEFAULT_MAX_DEPTH};

use crate::config::Config;
use crate::output::{aggregate, CrawlSummary, TreeStats};
use crate::state::TraversalContext;
use crate::tree::OrgNode;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use url::Url;

/// Result of a complete crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Main branches in document order
    pub tree: Vec<OrgNode>,
    pub stats: TreeStats,

    /// Size of the visited set when the crawl finished
    pub visited_urls: usize,
    pub requests: u64,
    pub failed_requests: u64,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Builds the run summary for this report
    pub fn summary(
        &self,
        entry_url: &str,
        config_hash: &str,
        output_paths: Vec<PathBuf>,
    ) -> CrawlSummary {
        CrawlSummary {
            entry_url: entry_url.to_string(),
            started_at: self.started_at,
            finished_at: self.finished_at,
            config_hash: config_hash.to_string(),
            stats: self.stats,
            visited_urls: self.visited_urls,
            requests: self.requests,
            failed_requests: self.failed_requests,
            output_paths,
        }
    }
}

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the user-agent and timeout settings
/// 2. Compile the selector table
/// 3. Walk the directory from the entry page
/// 4. Aggregate statistics over the resulting tree
///
/// Individual page failures never abort the crawl; only an invalid
/// configuration or an HTTP client that cannot be built is an error.
///
/// # Arguments
///
/// * `config` - The crawler configuration
pub async fn crawl(config: &Config) -> crate::Result<CrawlReport> {
    let fetcher = HttpFetcher::new(&config.user_agent, config.crawler.request_timeout())?;
    crawl_with(&fetcher, config).await
}

/// Runs a complete crawl with the given fetcher
pub async fn crawl_with<F: PageFetcher>(
    fetcher: &F,
    config: &Config,
) -> crate::Result<CrawlReport> {
    let rules = ExtractionRules::compile(&config.selectors)?;
    let entry_url = Url::parse(&config.crawler.entry_url)?;
    let base_url = Url::parse(&config.crawler.base_url)?;

    let walker = TreeWalker::new(fetcher, &rules, base_url)
        .with_max_depth(config.crawler.max_depth)
        .with_pacing(Pacing::from_config(&config.pacing));

    let started_at = Utc::now();
    let mut ctx = TraversalContext::new();
    let tree = walker.walk(&mut ctx, &entry_url).await;
    let finished_at = Utc::now();

    let stats = aggregate(&tree);
    tracing::info!(
        "Crawl finished: {} branches, {} units, {} URLs visited, {} requests ({} failed)",
        stats.main_branches,
        stats.units,
        ctx.visited_count(),
        ctx.fetch_count(),
        ctx.failed_fetch_count()
    );

    Ok(CrawlReport {
        tree,
        stats,
        visited_urls: ctx.visited_count(),
        requests: ctx.fetch_count(),
        failed_requests: ctx.failed_fetch_count(),
        started_at,
        finished_at,
    })
}
