//! Markdown summary generation
//!
//! This module generates a human-readable markdown report of a crawl run,
//! including the tree statistics and request counts.

use crate::output::traits::{CrawlSummary, OutputError, OutputResult};
use std::fs;
use std::path::Path;

/// Writes a markdown summary of a crawl run
///
/// # Arguments
///
/// * `summary` - The crawl summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, markdown).map_err(|source| OutputError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Organization Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Entry URL**: {}\n", summary.entry_url));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at.to_rfc3339()));
    let duration = summary.duration_seconds();
    md.push_str(&format!(
        "- **Duration**: {} seconds ({:.2} minutes)\n",
        duration,
        duration as f64 / 60.0
    ));
    md.push_str(&format!("- **Config Hash**: {}\n\n", summary.config_hash));

    // Tree shape
    let stats = &summary.stats;
    md.push_str("## Organization Statistics\n\n");
    md.push_str("| Count | Value |\n");
    md.push_str("|-------|-------|\n");
    md.push_str(&format!("| Main branches | {} |\n", stats.main_branches));
    md.push_str(&format!("| Subcategories | {} |\n", stats.subcategories));
    md.push_str(&format!("| Organizational units | {} |\n", stats.units));
    md.push_str(&format!("| Nested subunits | {} |\n", stats.subunits));
    md.push_str(&format!("| Flat list items | {} |\n", stats.flat_items));
    md.push_str(&format!("| Items with location info | {} |\n", stats.with_location));
    md.push_str(&format!("| Items with full unit name | {} |\n\n", stats.with_full_name));

    // Requests
    md.push_str("## Requests\n\n");
    md.push_str(&format!("- **Unique URLs Visited**: {}\n", summary.visited_urls));
    md.push_str(&format!("- **Requests Made**: {}\n", summary.requests));
    md.push_str(&format!("- **Failed Requests**: {}\n", summary.failed_requests));
    md.push_str(&format!("- **Success Rate**: {:.2}%\n\n", summary.success_rate()));

    if !summary.output_paths.is_empty() {
        md.push_str("## Output Files\n\n");
        for path in &summary.output_paths {
            md.push_str(&format!("- {}\n", path.display()));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::stats::TreeStats;
    use chrono::{Duration, TimeZone, Utc};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_summary() -> CrawlSummary {
        let started_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        CrawlSummary {
            entry_url: "https://example.com/units/us".to_string(),
            started_at,
            finished_at: started_at + Duration::hours(1),
            config_hash: "abc123".to_string(),
            stats: TreeStats {
                main_branches: 6,
                subcategories: 31,
                units: 412,
                subunits: 1780,
                flat_items: 905,
                with_location: 1500,
                with_full_name: 1210,
            },
            visited_urls: 2190,
            requests: 3100,
            failed_requests: 12,
            output_paths: vec![PathBuf::from("scrape_output/military_organization.json")],
        }
    }

    #[test]
    fn test_format_markdown_summary() {
        let markdown = format_markdown_summary(&create_test_summary());

        assert!(markdown.contains("# Organization Crawl Summary"));
        assert!(markdown.contains("- **Entry URL**: https://example.com/units/us"));
        assert!(markdown.contains("- **Duration**: 3600 seconds (60.00 minutes)"));
        assert!(markdown.contains("- **Config Hash**: abc123"));
    }

    #[test]
    fn test_markdown_contains_statistics() {
        let markdown = format_markdown_summary(&create_test_summary());

        assert!(markdown.contains("| Main branches | 6 |"));
        assert!(markdown.contains("| Nested subunits | 1780 |"));
        assert!(markdown.contains("- **Unique URLs Visited**: 2190"));
        assert!(markdown.contains("scrape_output/military_organization.json"));
    }

    #[test]
    fn test_markdown_without_outputs() {
        let mut summary = create_test_summary();
        summary.output_paths.clear();

        assert!(!format_markdown_summary(&summary).contains("## Output Files"));
    }

    #[test]
    fn test_generate_markdown_summary_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports/summary.md");

        generate_markdown_summary(&create_test_summary(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Organization Crawl Summary"));
    }
}
