//! Parsed directory page
//!
//! [`Document`] is the small query surface the walker needs from a page:
//! select elements, read their text and `href`, and turn anchors into
//! [`Link`]s with absolute URLs.

use crate::url::resolve_link;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A named link discovered on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Trimmed display text
    pub name: String,

    /// Absolute, canonical target
    pub url: Url,
}

/// A fetched and parsed page
pub struct Document {
    url: Url,
    html: Html,
}

impl Document {
    /// Parses an HTML body fetched from `url`
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    /// The URL the document was fetched from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns true if at least one element matches
    pub fn has_match(&self, selector: &Selector) -> bool {
        self.html.select(selector).next().is_some()
    }

    /// Normalized text of the first matching element
    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.html.select(selector).next().map(element_text)
    }

    /// Links from every matching anchor, in document order
    ///
    /// Anchors without text, without `href`, or whose `href` cannot be
    /// resolved against `base` are skipped.
    pub fn select_links(&self, selector: &Selector, base: &Url) -> Vec<Link> {
        self.html
            .select(selector)
            .filter_map(|anchor| link_from(anchor, element_text(anchor), base))
            .collect()
    }

    /// Links from anchors that wrap a heading; the heading text names the link
    ///
    /// Anchors without a matching heading are skipped.
    pub fn select_headed_links(
        &self,
        anchor_selector: &Selector,
        heading_selector: &Selector,
        base: &Url,
    ) -> Vec<Link> {
        self.html
            .select(anchor_selector)
            .filter_map(|anchor| {
                let heading = anchor.select(heading_selector).next()?;
                link_from(anchor, element_text(heading), base)
            })
            .collect()
    }
}

fn link_from(anchor: ElementRef<'_>, name: String, base: &Url) -> Option<Link> {
    if name.is_empty() {
        tracing::debug!("Skipping anchor without text");
        return None;
    }

    let Some(href) = anchor.value().attr("href") else {
        tracing::debug!("Skipping '{}': no href", name);
        return None;
    };

    match resolve_link(base, href) {
        Some(url) => Some(Link { name, url }),
        None => {
            tracing::debug!("Skipping '{}': unresolvable href '{}'", name, href);
            None
        }
    }
}

/// Text content with surrounding whitespace stripped and inner runs collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
