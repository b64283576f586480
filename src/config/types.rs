use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for orgtree
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub pacing: PacingConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Directory page listing the main branches
    #[serde(rename = "entry-url")]
    pub entry_url: String,

    /// Base used to resolve relative branch and unit links
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum recursion depth of the nested pass, counted from the first nested level
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            entry_url: "https://currentops.com/units/us".to_string(),
            base_url: "https://currentops.com".to_string(),
            max_depth: 3,
            request_timeout: 10,
        }
    }
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Fixed delays between requests (milliseconds, 0 disables)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause after each main branch
    #[serde(rename = "branch-delay")]
    pub branch_delay: u64,

    /// Pause after each subcategory
    #[serde(rename = "subcategory-delay")]
    pub subcategory_delay: u64,

    /// Pause after each nested item that was expanded
    #[serde(rename = "child-delay")]
    pub child_delay: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            branch_delay: 1000,
            subcategory_delay: 500,
            child_delay: 300,
        }
    }
}

impl PacingConfig {
    /// Pacing with every delay disabled
    pub fn disabled() -> Self {
        Self {
            branch_delay: 0,
            subcategory_delay: 0,
            child_delay: 0,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "orgtree".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            contact_email: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        let product = format!("{}/{}", self.crawler_name, self.crawler_version);
        let contact: Vec<String> = [
            self.contact_url.as_ref().map(|u| format!("+{}", u)),
            self.contact_email.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if contact.is_empty() {
            product
        } else {
            format!("{} ({})", product, contact.join("; "))
        }
    }
}

/// CSS selectors describing the directory markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Anchors that may wrap a branch or subcategory heading
    #[serde(rename = "branch-link")]
    pub branch_link: String,

    /// Heading inside a branch anchor carrying the display name
    #[serde(rename = "branch-heading")]
    pub branch_heading: String,

    /// Links of a flat roster
    #[serde(rename = "flat-list")]
    pub flat_list: String,

    /// Pattern whose presence marks a page as nested
    #[serde(rename = "nested-marker")]
    pub nested_marker: String,

    /// Child-link pattern per nested depth; the last entry covers deeper levels
    pub levels: Vec<String>,

    #[serde(rename = "full-unit-name")]
    pub full_unit_name: String,

    #[serde(rename = "location-name")]
    pub location_name: String,

    #[serde(rename = "location-details")]
    pub location_details: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        let second_level = ".subords-units > li > ul > li > div .margin-right-5px + a";
        Self {
            branch_link: "div > a".to_string(),
            branch_heading: "h4".to_string(),
            flat_list: ".subords-units ul a".to_string(),
            nested_marker: second_level.to_string(),
            levels: vec![
                ".subords-units > li > ul > li > div:nth-child(1) > a".to_string(),
                second_level.to_string(),
                ".subords-units ul ul .margin-right-5px + a".to_string(),
            ],
            full_unit_name: ".grippy-host, .subords-units ul ul .margin-right-5px + a".to_string(),
            location_name: ".subords-units ul ul .location a".to_string(),
            location_details: ".subords-units ul ul i".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the canonical JSON tree document
    #[serde(rename = "tree-path")]
    pub tree_path: String,

    /// Optional second copy of the tree document
    #[serde(rename = "copy-path")]
    pub copy_path: Option<String>,

    /// Optional markdown run summary
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            tree_path: "scrape_output/military_organization.json".to_string(),
            copy_path: None,
            summary_path: None,
        }
    }
}
