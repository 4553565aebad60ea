use crate::mindmap::node::MindmapNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One node of a flattened mindmap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlatRecord {
    /// Display label (placeholder applied)
    pub text: String,

    /// Distance from the root, root = 0
    pub depth: usize,

    /// Number of direct children
    pub children_count: usize,
}

/// Flatten a tree into pre-order records
///
/// Each node is emitted before its subtree, and siblings are visited left to
/// right. A missing root yields no records.
pub fn flatten(root: Option<&MindmapNode>) -> Vec<FlatRecord> {
    let Some(root) = root else {
        return Vec::new();
    };

    let mut records = Vec::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        records.push(FlatRecord {
            text: node.text().to_string(),
            depth,
            children_count: node.children_count(),
        });

        // Reversed so the leftmost child is popped first
        stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
    }

    log::debug!("Flattened mindmap into {} records", records.len());
    records
}

/// Flatten untyped JSON, treating `null` as an absent root
pub fn flatten_value(value: &Value) -> Vec<FlatRecord> {
    let root = MindmapNode::from_value(value);
    flatten(root.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_tree() -> MindmapNode {
        MindmapNode::new("Root").with_children(vec![
            MindmapNode::new("A"),
            MindmapNode::new("B").with_children(vec![MindmapNode::new("B1")]),
        ])
    }

    #[test]
    fn test_flatten_preorder() {
        let records = flatten(Some(&create_test_tree()));

        let texts: Vec<_> = records.iter().map(|r| r.text.as_str()).collect();
        let depths: Vec<_> = records.iter().map(|r| r.depth).collect();
        let counts: Vec<_> = records.iter().map(|r| r.children_count).collect();

        assert_eq!(texts, vec!["Root", "A", "B", "B1"]);
        assert_eq!(depths, vec![0, 1, 1, 2]);
        assert_eq!(counts, vec![2, 0, 1, 0]);
    }

    #[test]
    fn test_flatten_subtree_before_sibling() {
        let tree = MindmapNode::new("Root").with_children(vec![
            MindmapNode::new("A").with_children(vec![
                MindmapNode::new("A1").with_children(vec![MindmapNode::new("A1a")]),
                MindmapNode::new("A2"),
            ]),
            MindmapNode::new("B"),
        ]);

        let texts: Vec<_> = flatten(Some(&tree)).into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["Root", "A", "A1", "A1a", "A2", "B"]);
    }

    #[test]
    fn test_flatten_absent_root() {
        assert!(flatten(None).is_empty());
        assert!(flatten_value(&Value::Null).is_empty());
    }

    #[test]
    fn test_flatten_single_node() {
        let records = flatten(Some(&MindmapNode::new("Only")));
        assert_eq!(
            records,
            vec![FlatRecord {
                text: "Only".to_string(),
                depth: 0,
                children_count: 0,
            }]
        );
    }

    #[test]
    fn test_flatten_value_applies_placeholders() {
        let records = flatten_value(&json!({
            "children": [{"text": ""}, "junk"]
        }));

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.text == "Untitled"));
        assert_eq!(records[0].children_count, 2);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let tree = create_test_tree();
        assert_eq!(flatten(Some(&tree)), flatten(Some(&tree)));
    }
}
