use crate::tree::UnitMetadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Where in the directory a node was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Top-level branch listed on the entry page
    MainBranch,

    /// Category listed on a branch page
    Subcategory,

    /// Item found by the nested pass; the value is the 1-based level
    Level(u32),

    /// Leaf taken from a flat roster
    FlatItem,
}

impl NodeKind {
    /// Name of the record key holding this node's children
    pub fn child_slot(&self) -> &'static str {
        match self {
            Self::MainBranch => "subcategories",
            Self::Subcategory => "units",
            Self::Level(_) | Self::FlatItem => "subunits",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainBranch => write!(f, "main_branch"),
            Self::Subcategory => write!(f, "subcategory"),
            Self::Level(level) => write!(f, "level_{}_item", level),
            Self::FlatItem => write!(f, "flat_item"),
        }
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main_branch" => Ok(Self::MainBranch),
            "subcategory" => Ok(Self::Subcategory),
            "flat_item" => Ok(Self::FlatItem),
            other => other
                .strip_prefix("level_")
                .and_then(|rest| rest.strip_suffix("_item"))
                .and_then(|level| level.parse::<u32>().ok())
                .filter(|level| *level >= 1)
                .map(Self::Level)
                .ok_or_else(|| format!("unknown node type '{}'", other)),
        }
    }
}

/// A unit of the organizational tree
///
/// Nodes are built once, children first, and attached to their parent after
/// the child list is complete. An empty child list is never written out: the
/// child slot is omitted from the record instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "NodeRecord", try_from = "NodeRecord")]
pub struct OrgNode {
    /// Display text of the unit
    pub name: String,

    /// Absolute, canonical page URL
    pub url: Url,

    pub kind: NodeKind,

    pub metadata: UnitMetadata,

    /// Ordered children, in document order
    pub children: Vec<OrgNode>,
}

impl OrgNode {
    pub fn new(name: impl Into<String>, url: Url, kind: NodeKind, metadata: UnitMetadata) -> Self {
        Self {
            name: name.into(),
            url,
            kind,
            metadata,
            children: Vec::new(),
        }
    }

    /// Attaches a finished child list
    pub fn with_children(mut self, children: Vec<OrgNode>) -> Self {
        if !children.is_empty() {
            self.children = children;
        }
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Serialized shape of a node
#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    name: String,
    url: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    metadata: UnitMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subcategories: Option<Vec<NodeRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    units: Option<Vec<NodeRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subunits: Option<Vec<NodeRecord>>,
}

impl From<OrgNode> for NodeRecord {
    fn from(node: OrgNode) -> Self {
        let kind = node.kind;
        let children = if node.children.is_empty() {
            None
        } else {
            Some(node.children.into_iter().map(NodeRecord::from).collect())
        };

        let mut record = NodeRecord {
            name: node.name,
            url: node.url.into(),
            kind: node.kind.to_string(),
            metadata: node.metadata,
            subcategories: None,
            units: None,
            subunits: None,
        };

        match kind {
            NodeKind::MainBranch => record.subcategories = children,
            NodeKind::Subcategory => record.units = children,
            NodeKind::Level(_) | NodeKind::FlatItem => record.subunits = children,
        }

        record
    }
}

impl TryFrom<NodeRecord> for OrgNode {
    type Error = String;

    fn try_from(record: NodeRecord) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err("node name cannot be empty".to_string());
        }

        let url = Url::parse(&record.url)
            .map_err(|e| format!("invalid node url '{}': {}", record.url, e))?;
        let kind = record.kind.parse::<NodeKind>()?;

        let children = record
            .subcategories
            .or(record.units)
            .or(record.subunits)
            .unwrap_or_default()
            .into_iter()
            .map(OrgNode::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let metadata = UnitMetadata::new(
            record.metadata.full_unit_name,
            record.metadata.location_name,
            record.metadata.location_details,
        );

        Ok(OrgNode::new(record.name, url, kind, metadata).with_children(children))
    }
}
