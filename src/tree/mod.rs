//! Organizational tree data model
//!
//! - `OrgNode`: one unit of the directory with its ordered children
//! - `NodeKind`: where in the directory a node was discovered
//! - `UnitMetadata`: the optional descriptive fields pulled from a unit page

mod metadata;
mod node;

pub use metadata::UnitMetadata;
pub use node::{NodeKind, OrgNode};
