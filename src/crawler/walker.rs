//! Recursive tree extraction
//!
//! The walker builds the organizational tree in one forward pass:
//!
//! 1. The entry page lists main branches (anchors wrapping a heading)
//! 2. Each branch page lists subcategories with the same pattern
//! 3. Each subcategory page is classified:
//!    - nested: the nested pass walks its children level by level, using the
//!      child-link pattern for the current depth, up to `max_depth`
//!    - flat: every roster entry becomes a leaf, fetched once for metadata
//!
//! A URL is recorded in the [`TraversalContext`] when the nested pass
//! recurses into it, before its children are visited, so back-references
//! never loop. Children that are only listed (leaves, flat pages, failed
//! fetches) stay unclaimed and appear under every parent that lists them;
//! their pages are fetched once and reused from the context.

use crate::crawler::classifier::{classify, Structure};
use crate::crawler::document::{Document, Link};
use crate::crawler::extract::extract_metadata;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::pacing::Pacing;
use crate::crawler::rules::ExtractionRules;
use crate::state::TraversalContext;
use crate::tree::{NodeKind, OrgNode, UnitMetadata};
use std::future::Future;
use std::pin::Pin;
use url::Url;

/// Default nested-pass depth bound
pub const DEFAULT_MAX_DEPTH: u32 = 3;

type NodesFuture<'s> = Pin<Box<dyn Future<Output = Vec<OrgNode>> + 's>>;

/// What the walker keeps from a unit page once it is parsed
struct PageSummary {
    metadata: UnitMetadata,
    children: Children,
}

enum Children {
    /// Links matched by the level pattern for the page's depth
    Nested(Vec<Link>),

    /// Roster links, resolved against the page itself
    Flat(Vec<Link>),
}

/// Builds the organizational tree from the directory
pub struct TreeWalker<'a, F> {
    fetcher: &'a F,
    rules: &'a ExtractionRules,
    base_url: Url,
    max_depth: u32,
    pacing: Pacing,
}

impl<'a, F: PageFetcher> TreeWalker<'a, F> {
    /// Creates a walker with the default depth bound and no pacing
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of pages
    /// * `rules` - Compiled selectors for the directory markup
    /// * `base_url` - Base for resolving branch and nested-item links
    pub fn new(fetcher: &'a F, rules: &'a ExtractionRules, base_url: Url) -> Self {
        Self {
            fetcher,
            rules,
            base_url,
            max_depth: DEFAULT_MAX_DEPTH,
            pacing: Pacing::none(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Crawls the whole directory starting at the entry page
    ///
    /// Returns the main branches in document order. If the entry page itself
    /// cannot be fetched the result is empty.
    pub async fn walk(&self, ctx: &mut TraversalContext, entry_url: &Url) -> Vec<OrgNode> {
        tracing::info!("Starting organizational crawl from {}", entry_url);

        let Some(entry) = self.load(ctx, entry_url).await else {
            tracing::error!("Entry page {} unavailable, nothing to crawl", entry_url);
            return Vec::new();
        };
        let candidates = entry.select_headed_links(
            &self.rules.branch_link,
            &self.rules.branch_heading,
            &self.base_url,
        );
        drop(entry);

        let mut branches = Vec::new();
        for candidate in candidates {
            tracing::info!("Found main branch: {}", candidate.name);

            if ctx.is_visited(&candidate.url) {
                tracing::debug!("Branch {} already visited", candidate.url);
                continue;
            }

            if let Some(branch) = self.walk_branch(ctx, candidate).await {
                branches.push(branch);
                self.pacing.after_branch().await;
            }
        }

        branches
    }

    async fn walk_branch(&self, ctx: &mut TraversalContext, link: Link) -> Option<OrgNode> {
        let page = self.load(ctx, &link.url).await?;
        let metadata = extract_metadata(&page, self.rules);
        let candidates = page.select_headed_links(
            &self.rules.branch_link,
            &self.rules.branch_heading,
            &self.base_url,
        );
        drop(page);

        let mut subcategories = Vec::new();
        for candidate in candidates {
            tracing::info!("  Found subcategory: {}", candidate.name);

            if let Some(subcategory) = self.walk_subcategory(ctx, candidate).await {
                subcategories.push(subcategory);
                self.pacing.after_subcategory().await;
            }
        }

        ctx.mark_visited(&link.url);

        Some(
            OrgNode::new(link.name, link.url, NodeKind::MainBranch, metadata)
                .with_children(subcategories),
        )
    }

    async fn walk_subcategory(&self, ctx: &mut TraversalContext, link: Link) -> Option<OrgNode> {
        let page = self.load(ctx, &link.url).await?;
        let summary = self.summarize(&page, 0);
        drop(page);

        let units = match summary.children {
            Children::Nested(children) => {
                if self.claim(ctx, &link.url, 0) {
                    self.expand(ctx, children, 0).await
                } else {
                    Vec::new()
                }
            }
            Children::Flat(items) => self.flat_items(ctx, items).await,
        };

        Some(
            OrgNode::new(link.name, link.url, NodeKind::Subcategory, summary.metadata)
                .with_children(units),
        )
    }

    /// Nested pass rooted at `url`
    ///
    /// Returns nothing, without fetching, if `url` was already visited in this
    /// run or `depth` exceeds the bound. Otherwise the URL is claimed, its page
    /// fetched, and the children matched by the level pattern for `depth` are
    /// built as `level_{depth+1}_item` nodes.
    pub async fn nested_pass(
        &self,
        ctx: &mut TraversalContext,
        url: &Url,
        depth: u32,
    ) -> Vec<OrgNode> {
        if !self.claim(ctx, url, depth) {
            return Vec::new();
        }

        let Some(page) = self.load(ctx, url).await else {
            return Vec::new();
        };
        let children = page.select_links(self.rules.level(depth), &self.base_url);
        drop(page);

        self.expand(ctx, children, depth).await
    }

    /// Checks the terminal conditions of the nested pass and claims the URL
    fn claim(&self, ctx: &mut TraversalContext, url: &Url, depth: u32) -> bool {
        if depth > self.max_depth {
            tracing::debug!("Depth {} beyond bound {}, skipping {}", depth, self.max_depth, url);
            return false;
        }
        if !ctx.mark_visited(url) {
            tracing::debug!("Already visited {}", url);
            return false;
        }
        true
    }

    /// Builds the level `depth + 1` items for a claimed page's child links
    ///
    /// A child is claimed only when it is recursed into: it was fetched, it is
    /// nested and `depth` is below the bound.
    fn expand<'s>(
        &'s self,
        ctx: &'s mut TraversalContext,
        links: Vec<Link>,
        depth: u32,
    ) -> NodesFuture<'s> {
        Box::pin(async move {
            let indent = "  ".repeat(depth as usize);
            let mut items = Vec::new();

            for link in links {
                if ctx.is_visited(&link.url) {
                    tracing::debug!("{}Already visited {}", indent, link.url);
                    continue;
                }

                tracing::info!(
                    "{}Found nested item (level {}): {}",
                    indent,
                    depth + 1,
                    link.name
                );

                let summary = self
                    .load_child(ctx, &link.url)
                    .await
                    .map(|page| self.summarize(&page, depth + 1));

                let metadata = summary
                    .as_ref()
                    .map(|s| s.metadata.clone())
                    .unwrap_or_default();
                let mut item = OrgNode::new(link.name, link.url, NodeKind::Level(depth + 1), metadata);

                if depth < self.max_depth {
                    if let Some(summary) = summary {
                        let children = match summary.children {
                            Children::Nested(children) => {
                                if self.claim(ctx, &item.url, depth + 1) {
                                    self.expand(ctx, children, depth + 1).await
                                } else {
                                    Vec::new()
                                }
                            }
                            Children::Flat(roster) => self.flat_items(ctx, roster).await,
                        };
                        item = item.with_children(children);
                        self.pacing.after_child().await;
                    }
                }

                items.push(item);
            }

            items
        })
    }

    /// Builds leaf nodes for a flat roster, fetching each entry for its metadata
    async fn flat_items(&self, ctx: &mut TraversalContext, links: Vec<Link>) -> Vec<OrgNode> {
        let mut items = Vec::with_capacity(links.len());

        for link in links {
            let metadata = match self.load(ctx, &link.url).await {
                Some(page) => extract_metadata(&page, self.rules),
                None => UnitMetadata::default(),
            };

            tracing::info!("Found flat item: {}", link.name);
            items.push(OrgNode::new(link.name, link.url, NodeKind::FlatItem, metadata));
        }

        items
    }

    /// Metadata and child links of a unit page whose children sit at `depth`
    fn summarize(&self, page: &Document, depth: u32) -> PageSummary {
        let metadata = extract_metadata(page, self.rules);
        let children = match classify(page, self.rules) {
            Structure::Nested => {
                Children::Nested(page.select_links(self.rules.level(depth), &self.base_url))
            }
            Structure::Flat => Children::Flat(page.select_links(&self.rules.flat_list, page.url())),
        };

        PageSummary { metadata, children }
    }

    /// Fetches and parses a page; failures are logged and yield None
    async fn load(&self, ctx: &mut TraversalContext, url: &Url) -> Option<Document> {
        self.fetch_body(ctx, url)
            .await
            .map(|body| Document::parse(url.clone(), &body))
    }

    /// Like [`Self::load`], but reuses the outcome of an earlier fetch of an
    /// unclaimed child page
    async fn load_child(&self, ctx: &mut TraversalContext, url: &Url) -> Option<Document> {
        if let Some(cached) = ctx.cached_body(url) {
            tracing::debug!("Reusing fetched page {}", url);
            return cached.map(|body| Document::parse(url.clone(), body));
        }

        let body = self.fetch_body(ctx, url).await;
        let page = body.as_deref().map(|b| Document::parse(url.clone(), b));
        ctx.cache_body(url, body);
        page
    }

    async fn fetch_body(&self, ctx: &mut TraversalContext, url: &Url) -> Option<String> {
        tracing::info!("Fetching: {}", url);

        match self.fetcher.fetch(url).await {
            Ok(body) => {
                ctx.record_fetch(true);
                Some(body)
            }
            Err(e) => {
                ctx.record_fetch(false);
                tracing::warn!("Failed to fetch {}: {}", url, e);
                None
            }
        }
    }
}
