//! Output module for persisting the tree and reporting on a run
//!
//! This module handles:
//! - Writing the tree as a JSON document
//! - Computing and printing tree statistics
//! - Generating markdown run summaries

mod json;
mod markdown;
pub mod stats;
mod traits;

pub use json::{read_tree, write_outputs, JsonOutputHandler};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{aggregate, count_subunits, print_statistics, SubunitCounts, TreeStats};
pub use traits::{CrawlSummary, OutputError, OutputHandler, OutputResult};
