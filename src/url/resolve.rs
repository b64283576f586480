use url::Url;

/// Resolves a link href to an absolute, canonical URL
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: links
/// - hrefs that cannot be joined onto the base
/// - non-HTTP(S) URLs after resolution
///
/// The fragment is dropped, since two links differing only by fragment name
/// the same unit page.
///
/// # Examples
///
/// ```
/// use orgtree::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com").unwrap();
/// let url = resolve_link(&base, "/units/us/army#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/units/us/army");
/// ```
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}

/// Key under which a URL is tracked in the visited set
pub fn canonical_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.into()
}
