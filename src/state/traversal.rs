use crate::url::canonical_key;
use std::collections::{HashMap, HashSet};
use url::Url;

/// Per-run traversal state
///
/// Holds the set of URLs the nested pass has recursed into, the bodies of
/// child pages fetched without being recursed into, and request counters for
/// the final report. A fresh context is created at the start of every run and
/// threaded by `&mut` through the recursion; nothing resets it mid-run.
#[derive(Debug, Clone, Default)]
pub struct TraversalContext {
    visited: HashSet<String>,
    pages: HashMap<String, Option<String>>,
    fetches: u64,
    failed_fetches: u64,
}

impl TraversalContext {
    /// Creates an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that treats the given URLs as already visited
    pub fn with_visited<'a>(urls: impl IntoIterator<Item = &'a Url>) -> Self {
        let mut ctx = Self::new();
        for url in urls {
            ctx.mark_visited(url);
        }
        ctx
    }

    /// Returns true if the URL has been claimed in this run
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(&canonical_key(url))
    }

    /// Claims a URL; returns false if it was already claimed
    ///
    /// A claimed URL is never loaded again, so any cached body is dropped.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        let key = canonical_key(url);
        self.pages.remove(&key);
        self.visited.insert(key)
    }

    /// Body of a page fetched earlier in this run
    ///
    /// `Some(None)` means the earlier fetch failed.
    pub fn cached_body(&self, url: &Url) -> Option<Option<&str>> {
        self.pages.get(&canonical_key(url)).map(Option::as_deref)
    }

    /// Remembers the outcome of fetching an unclaimed page
    pub fn cache_body(&mut self, url: &Url, body: Option<String>) {
        self.pages.insert(canonical_key(url), body);
    }

    /// Number of distinct URLs claimed
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn record_fetch(&mut self, succeeded: bool) {
        self.fetches += 1;
        if !succeeded {
            self.failed_fetches += 1;
        }
    }

    /// Total page requests issued
    pub fn fetch_count(&self) -> u64 {
        self.fetches
    }

    pub fn failed_fetch_count(&self) -> u64 {
        self.failed_fetches
    }
}
