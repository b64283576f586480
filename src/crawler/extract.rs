//! Unit metadata extraction

use crate::crawler::document::Document;
use crate::crawler::rules::ExtractionRules;
use crate::tree::UnitMetadata;

/// Pulls the optional descriptive fields from a unit page
///
/// Each field takes the text of the first matching element. A field with no
/// match, or whose first match has no text, is absent.
pub fn extract_metadata(document: &Document, rules: &ExtractionRules) -> UnitMetadata {
    UnitMetadata::new(
        document.first_text(&rules.full_unit_name),
        document.first_text(&rules.location_name),
        document.first_text(&rules.location_details),
    )
}
