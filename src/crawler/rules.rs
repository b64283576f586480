//! Compiled selector table
//!
//! Selectors are compiled once per run from [`SelectorConfig`]. The child-link
//! pattern for the nested pass is looked up by depth in an ordered table;
//! depths past the end of the table reuse its last entry.

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::Selector;

/// Compiled selectors describing the directory markup
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    pub branch_link: Selector,
    pub branch_heading: Selector,
    pub flat_list: Selector,
    pub nested_marker: Selector,
    pub full_unit_name: Selector,
    pub location_name: Selector,
    pub location_details: Selector,
    levels: Vec<Selector>,
}

impl ExtractionRules {
    /// Compiles every selector in the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ExtractionRules)` - All selectors parsed
    /// * `Err(ConfigError)` - A selector failed to parse, or the level table is empty
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        if config.levels.is_empty() {
            return Err(ConfigError::Validation(
                "selectors.levels must name at least one pattern".to_string(),
            ));
        }

        let levels = config
            .levels
            .iter()
            .map(|s| compile_selector(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            branch_link: compile_selector(&config.branch_link)?,
            branch_heading: compile_selector(&config.branch_heading)?,
            flat_list: compile_selector(&config.flat_list)?,
            nested_marker: compile_selector(&config.nested_marker)?,
            full_unit_name: compile_selector(&config.full_unit_name)?,
            location_name: compile_selector(&config.location_name)?,
            location_details: compile_selector(&config.location_details)?,
            levels,
        })
    }

    /// Child-link pattern for a nested depth (saturating)
    pub fn level(&self, depth: u32) -> &Selector {
        let index = (depth as usize).min(self.levels.len() - 1);
        &self.levels[index]
    }
}

fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
