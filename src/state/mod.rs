//! State module for tracking crawl progress
//!
//! The only mutable state shared across one crawl run is the visited set,
//! carried by [`TraversalContext`] through every recursive call.

mod traversal;

pub use traversal::TraversalContext;
