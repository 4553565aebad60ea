use crate::json;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Label used when a node carries no usable text
pub const UNTITLED: &str = "Untitled";

/// Represents one node of a mindmap and everything below it
///
/// Nodes are plain values: no identity, no parent pointer. Trees scraped from a
/// page are not trusted, so deserialization never fails on shape. Missing or
/// malformed fields collapse to an absent label and no children.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MindmapNode {
    /// Raw label as scraped, `None` when the source had none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Child nodes in display order
    pub children: Vec<MindmapNode>,
}

impl MindmapNode {
    /// Create a leaf node with the given label
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Create a leaf node without a label
    pub fn untitled() -> Self {
        Self::default()
    }

    /// Builder method: set label
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<MindmapNode>) -> Self {
        self.children = children;
        self
    }

    /// Add a child node
    pub fn add_child(&mut self, child: MindmapNode) {
        self.children.push(child);
    }

    /// Label to display, falling back to [`UNTITLED`] when absent or empty
    pub fn text(&self) -> &str {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => UNTITLED,
        }
    }

    /// Raw label without any placeholder substitution
    pub fn label(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Child nodes (empty for leaves)
    pub fn children(&self) -> &[MindmapNode] {
        &self.children
    }

    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Count nodes in the subtree rooted here, including this node
    pub fn count_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Greatest distance from this node to any descendant
    pub fn max_depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        max_depth
    }

    /// Build a node from untyped JSON, coercing malformed input
    ///
    /// Returns `None` only for `null`. Any other non-object becomes an unlabeled
    /// leaf. A `children` value that is not an array is treated as empty, and
    /// `null` entries inside it are skipped.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }

        let mut stack = vec![PendingNode::open(value)];
        loop {
            let next = stack.last_mut()?.pending.next();
            match next {
                Some(child) if child.is_null() => continue,
                Some(child) => stack.push(PendingNode::open(child)),
                None => {
                    let finished = stack.pop()?.finish();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(finished),
                        None => return Some(finished),
                    }
                }
            }
        }
    }
}

/// A node whose children are still being converted
struct PendingNode<'a> {
    text: Option<String>,
    pending: std::slice::Iter<'a, Value>,
    children: Vec<MindmapNode>,
}

impl<'a> PendingNode<'a> {
    fn open(value: &'a Value) -> Self {
        let text = value.get("text").and_then(coerce_text);
        let pending = value
            .get("children")
            .and_then(Value::as_array)
            .map(|children| children.as_slice())
            .unwrap_or(&[])
            .iter();

        Self {
            text,
            pending,
            children: Vec::new(),
        }
    }

    fn finish(self) -> MindmapNode {
        MindmapNode {
            text: self.text,
            children: self.children,
        }
    }
}

// Dropping a deep chain recursively would exhaust the stack
impl Drop for MindmapNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for MindmapNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let node = Self::from_value(&value).unwrap_or_default();
        json::dispose(value);
        Ok(node)
    }
}
