//! Structure classification
//!
//! Decides whether a unit page lists its children as a nested collection
//! (each child roots its own subtree) or as a flat roster of leaves.

use crate::crawler::document::Document;
use crate::crawler::rules::ExtractionRules;

/// How a page presents its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    Nested,
    Flat,
}

/// Returns true if the page's children need recursive classification
///
/// The page is nested iff the nested-marker pattern matches at least one
/// element. The decision depends on this document alone.
pub fn is_nested(document: &Document, rules: &ExtractionRules) -> bool {
    document.has_match(&rules.nested_marker)
}

/// Classifies a page
pub fn classify(document: &Document, rules: &ExtractionRules) -> Structure {
    if is_nested(document, rules) {
        Structure::Nested
    } else {
        Structure::Flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;
    use url::Url;

    const NESTED_PAGE: &str = r#"
        <ul class="subords-units"><li><ul>
            <li><div><span class="margin-right-5px"></span><a href="/units/1">1st Brigade</a></div></li>
        </ul></li></ul>"#;

    const FLAT_PAGE: &str = r#"
        <ul class="subords-units"><li><ul>
            <li><a href="/units/a">A Company</a></li>
            <li><a href="/units/b">B Company</a></li>
        </ul></li></ul>"#;

    fn rules() -> ExtractionRules {
        ExtractionRules::compile(&SelectorConfig::default()).unwrap()
    }

    fn doc(body: &str) -> Document {
        Document::parse(Url::parse("https://example.com/units/x").unwrap(), body)
    }

    #[test]
    fn test_marker_means_nested() {
        assert!(is_nested(&doc(NESTED_PAGE), &rules()));
        assert_eq!(classify(&doc(NESTED_PAGE), &rules()), Structure::Nested);
    }

    #[test]
    fn test_plain_roster_is_flat() {
        assert!(!is_nested(&doc(FLAT_PAGE), &rules()));
        assert_eq!(classify(&doc(FLAT_PAGE), &rules()), Structure::Flat);
    }

    #[test]
    fn test_empty_page_is_flat() {
        assert_eq!(classify(&doc("<html></html>"), &rules()), Structure::Flat);
    }

    #[test]
    fn test_same_content_same_answer() {
        let rules = rules();
        let first = is_nested(&doc(NESTED_PAGE), &rules);
        let _ = is_nested(&doc(FLAT_PAGE), &rules);
        let second = is_nested(&doc(NESTED_PAGE), &rules);
        assert_eq!(first, second);
    }
}
