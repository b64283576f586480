//! Statistics over a finished tree
//!
//! Counts are computed by a read-only fold over the tree, so they always
//! mirror the shape actually produced rather than a fixed depth.

use crate::tree::{NodeKind, OrgNode};
use std::iter::Sum;
use std::ops::Add;

/// Aggregate counts for a crawled tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of main branches
    pub main_branches: usize,

    /// Number of subcategories across all branches
    pub subcategories: usize,

    /// Units listed directly under a subcategory
    pub units: usize,

    /// Every node below the top-level units
    pub subunits: usize,

    /// Leaves that came from a flat roster, at any depth
    pub flat_items: usize,

    /// Nodes with a location name or location details
    pub with_location: usize,

    /// Nodes with a full unit name
    pub with_full_name: usize,
}

/// Counts gathered from a unit list and everything below it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubunitCounts {
    pub subunits: usize,
    pub flat_items: usize,
    pub with_location: usize,
    pub with_full_name: usize,
}

impl Add for SubunitCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            subunits: self.subunits + other.subunits,
            flat_items: self.flat_items + other.flat_items,
            with_location: self.with_location + other.with_location,
            with_full_name: self.with_full_name + other.with_full_name,
        }
    }
}

impl Sum for SubunitCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Folds a list of units and their descendants into counts
///
/// The items themselves contribute to the flat, location and full-name
/// counts; only their descendants count as subunits. A node without
/// children contributes nothing below itself.
pub fn count_subunits(items: &[OrgNode]) -> SubunitCounts {
    items
        .iter()
        .map(|item| {
            let own = SubunitCounts {
                subunits: item.children.len(),
                flat_items: usize::from(item.kind == NodeKind::FlatItem),
                with_location: usize::from(item.metadata.has_location()),
                with_full_name: usize::from(item.metadata.has_full_name()),
            };
            own + count_subunits(&item.children)
        })
        .sum()
}

/// Computes statistics for a whole tree
pub fn aggregate(tree: &[OrgNode]) -> TreeStats {
    let mut stats = TreeStats {
        main_branches: tree.len(),
        ..TreeStats::default()
    };

    for branch in tree {
        stats.with_location += usize::from(branch.metadata.has_location());
        stats.with_full_name += usize::from(branch.metadata.has_full_name());
        stats.subcategories += branch.children.len();

        for subcategory in &branch.children {
            stats.with_location += usize::from(subcategory.metadata.has_location());
            stats.with_full_name += usize::from(subcategory.metadata.has_full_name());
            stats.units += subcategory.children.len();

            let counts = count_subunits(&subcategory.children);
            stats.subunits += counts.subunits;
            stats.flat_items += counts.flat_items;
            stats.with_location += counts.with_location;
            stats.with_full_name += counts.with_full_name;
        }
    }

    stats
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `visited_urls` - Distinct URLs visited, if known
pub fn print_statistics(stats: &TreeStats, visited_urls: Option<usize>) {
    println!("=== Organization Statistics ===\n");

    println!("  Main branches: {}", stats.main_branches);
    println!("  Subcategories: {}", stats.subcategories);
    println!("  Organizational units: {}", stats.units);
    println!("  Nested subunits: {}", stats.subunits);
    println!("  Flat list items: {}", stats.flat_items);
    println!("  Items with location info: {}", stats.with_location);
    println!("  Items with full unit name: {}", stats.with_full_name);

    if let Some(visited) = visited_urls {
        println!("  Total unique URLs visited: {}", visited);
    }
}
