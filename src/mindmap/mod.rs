//! Mindmap tree model
//!
//! This module provides the in-memory representation of an extracted mindmap:
//! - MindmapNode: a labeled node and its ordered children
//! - Mindmap: the extracted document (root node plus extraction metadata)
//! - FlatRecord: pre-order linearization used by the outline and prompt builders

pub mod flatten;
pub mod node;
pub mod tree;

pub use flatten::{FlatRecord, flatten, flatten_value};
pub use node::{MindmapNode, UNTITLED};
pub use tree::{Mindmap, TreeStats};

use crate::error::Result;

/// Parse extractor output into a mindmap document
pub fn parse_mindmap(json: &str) -> Result<Mindmap> {
    Mindmap::from_json(json)
}
