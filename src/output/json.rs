//! JSON tree documents

use crate::config::OutputConfig;
use crate::output::traits::{OutputError, OutputHandler, OutputResult};
use crate::tree::OrgNode;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};

/// Indentation of the written document
const INDENT: &[u8] = b"    ";

/// Writes the tree as an indented UTF-8 JSON array
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOutputHandler;

impl JsonOutputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Renders the tree without touching the filesystem
    pub fn render(&self, tree: &[OrgNode]) -> OutputResult<Vec<u8>> {
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        tree.serialize(&mut serializer)?;
        buffer.push(b'\n');
        Ok(buffer)
    }
}

impl OutputHandler for JsonOutputHandler {
    fn write_tree(&self, tree: &[OrgNode], destination: &Path) -> OutputResult<()> {
        let document = self.render(tree)?;

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| OutputError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(destination, document).map_err(|source| OutputError::Write {
            path: destination.to_path_buf(),
            source,
        })?;

        tracing::info!("Wrote {} branches to {}", tree.len(), destination.display());
        Ok(())
    }
}

/// Reads a tree document written by an earlier run
pub fn read_tree(source: &Path) -> OutputResult<Vec<OrgNode>> {
    let content = fs::read_to_string(source)?;
    Ok(serde_json::from_str(&content)?)
}

/// Writes the canonical tree document and, if configured, its duplicate
///
/// # Returns
///
/// The paths written, canonical first
pub fn write_outputs(config: &OutputConfig, tree: &[OrgNode]) -> OutputResult<Vec<PathBuf>> {
    let handler = JsonOutputHandler::new();
    let mut written = Vec::new();

    let canonical = PathBuf::from(&config.tree_path);
    handler.write_tree(tree, &canonical)?;
    written.push(canonical);

    if let Some(copy) = &config.copy_path {
        let copy = PathBuf::from(copy);
        handler.write_tree(tree, &copy)?;
        written.push(copy);
    }

    Ok(written)
}
