use crate::error::{MindmapError, Result};
use crate::export::outline::format_outline;
use crate::export::table::{Table, to_table};
use crate::json;
use crate::mindmap::flatten::{FlatRecord, flatten};
use crate::mindmap::node::MindmapNode;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An extracted mindmap: the node tree plus whatever the extractor recorded
/// about where it came from (page title, url, timestamp, ...)
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Mindmap {
    /// Root of the node tree
    pub data: MindmapNode,

    /// Extraction metadata, kept in insertion order
    #[serde(flatten)]
    pub metadata: IndexMap<String, Value>,
}

/// Summary numbers for a mindmap
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth: usize,
    pub leaf_count: usize,
}

impl Mindmap {
    /// Create a mindmap without metadata
    pub fn new(root: MindmapNode) -> Self {
        Self {
            data: root,
            metadata: IndexMap::new(),
        }
    }

    /// Builder method: add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Parse extractor output
    ///
    /// Accepts either an envelope `{"data": <node>, ...metadata}` or a bare node.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = json::from_str(json).map_err(MindmapError::Parse)?;
        let mindmap = Self::from_value(&value);
        json::dispose(value);
        Ok(mindmap)
    }

    /// Build a mindmap from untyped JSON, see [`Mindmap::from_json`]
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(object) if object.get("data").is_some_and(Value::is_object) => {
                let data = object
                    .get("data")
                    .and_then(MindmapNode::from_value)
                    .unwrap_or_default();
                let metadata = object
                    .iter()
                    .filter(|(key, _)| key.as_str() != "data")
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                Self { data, metadata }
            }
            _ => Self::new(MindmapNode::from_value(value).unwrap_or_default()),
        }
    }

    /// Root node of the tree
    pub fn root(&self) -> &MindmapNode {
        &self.data
    }

    /// Get a metadata value by key
    pub fn get_metadata(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Flatten the tree into pre-order records
    pub fn flatten(&self) -> Vec<FlatRecord> {
        flatten(Some(&self.data))
    }

    /// Render the tree as an indented outline
    pub fn outline(&self) -> String {
        format_outline(&self.flatten())
    }

    /// Export the tree as a table
    pub fn to_table(&self) -> Result<Table> {
        to_table(&self.data)
    }

    /// Count, depth and leaf numbers for the tree
    pub fn stats(&self) -> TreeStats {
        let records = self.flatten();
        TreeStats {
            node_count: records.len(),
            max_depth: records.iter().map(|r| r.depth).max().unwrap_or(0),
            leaf_count: records.iter().filter(|r| r.children_count == 0).count(),
        }
    }

    /// Convert the whole document to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(json::to_string_pretty(self)?)
    }

    /// Convert the whole document to single-line JSON
    pub fn to_compact_json(&self) -> Result<String> {
        Ok(json::to_string(self)?)
    }
}

impl<'de> Deserialize<'de> for Mindmap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let mindmap = Self::from_value(&value);
        json::dispose(value);
        Ok(mindmap)
    }
}

impl From<MindmapNode> for Mindmap {
    fn from(root: MindmapNode) -> Self {
        Self::new(root)
    }
}
