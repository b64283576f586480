//! orgtree main entry point
//!
//! This is the command-line interface for the orgtree directory mapper.

use anyhow::{Context, Result};
use clap::Parser;
use orgtree::config::{load_config_with_hash, validate, Config, PacingConfig};
use orgtree::crawler::crawl;
use orgtree::output::{
    aggregate, generate_markdown_summary, print_statistics, read_tree, write_outputs,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// orgtree: maps a public organizational directory into a JSON tree
///
/// orgtree walks a directory of military organizational units, starting from
/// a page listing the main branches, and records every branch, subcategory,
/// unit and subunit it finds together with their locations.
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(version)]
#[command(about = "Maps an organizational unit directory into a JSON tree", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics for an existing tree document and exit
    #[arg(long, value_name = "FILE", conflicts_with = "dry_run")]
    stats: Option<PathBuf>,

    /// Disable the pauses between requests
    #[arg(long)]
    no_delay: bool,

    /// Override the nested-pass depth bound
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Override the tree document path
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Some(path) = &cli.stats {
        return handle_stats(path);
    }

    let (config, config_hash) = load(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
    } else {
        handle_crawl(&config, &config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("orgtree=info,warn"),
            1 => EnvFilter::new("orgtree=debug,info"),
            2 => EnvFilter::new("orgtree=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration and applies command-line overrides
fn load(cli: &Cli) -> Result<(Config, String)> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, hash)
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            (Config::default(), "defaults".to_string())
        }
    };

    if cli.no_delay {
        config.pacing = PacingConfig::disabled();
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(output) = &cli.output {
        config.output.tree_path = output.display().to_string();
    }

    validate(&config).context("Invalid configuration")?;
    Ok((config, hash))
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, config_hash: &str) {
    println!("=== orgtree Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Entry URL: {}", config.crawler.entry_url);
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  Config hash: {}", config_hash);

    println!("\nPacing:");
    println!("  After branch: {}ms", config.pacing.branch_delay);
    println!("  After subcategory: {}ms", config.pacing.subcategory_delay);
    println!("  After child: {}ms", config.pacing.child_delay);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nSelectors:");
    println!("  Branch link: {}", config.selectors.branch_link);
    println!("  Nested marker: {}", config.selectors.nested_marker);
    println!("  Flat list: {}", config.selectors.flat_list);
    for (depth, level) in config.selectors.levels.iter().enumerate() {
        println!("  Level {}: {}", depth, level);
    }

    println!("\nOutput:");
    println!("  Tree: {}", config.output.tree_path);
    if let Some(copy) = &config.output.copy_path {
        println!("  Copy: {}", copy);
    }
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: recomputes statistics from a written tree
fn handle_stats(path: &Path) -> Result<()> {
    let tree = read_tree(path)
        .with_context(|| format!("Failed to read tree document {}", path.display()))?;
    print_statistics(&aggregate(&tree), None);
    Ok(())
}

/// Handles the normal crawl mode
async fn handle_crawl(config: &Config, config_hash: &str) -> Result<()> {
    let report = crawl(config).await?;

    let written = write_outputs(&config.output, &report.tree)?;

    if let Some(summary_path) = &config.output.summary_path {
        let summary = report.summary(&config.crawler.entry_url, config_hash, written.clone());
        generate_markdown_summary(&summary, Path::new(summary_path))?;
        tracing::info!("Summary written to {}", summary_path);
    }

    println!("\nCrawl complete in {}s", report.duration().num_seconds());
    for path in &written {
        println!("Results saved to {}", path.display());
    }
    println!();
    print_statistics(&report.stats, Some(report.visited_urls));

    Ok(())
}
