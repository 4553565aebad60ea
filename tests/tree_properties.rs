use mindmap_extract::{Mindmap, MindmapNode, TransportCodec, flatten, to_table};
use mindmap_extract::transport::Alphabet;
use proptest::prelude::*;

fn arb_label() -> impl Strategy<Value = String> {
    r#"[a-zA-Z0-9 ,"\n>]{1,8}"#
}

fn arb_tree() -> impl Strategy<Value = MindmapNode> {
    let leaf = arb_label().prop_map(MindmapNode::new);
    leaf.prop_recursive(6, 64, 5, |inner| {
        (arb_label(), prop::collection::vec(inner, 0..5))
            .prop_map(|(text, children)| MindmapNode::new(text).with_children(children))
    })
}

/// Any JSON-representable tree, including missing and unusual labels
fn arb_loose_tree() -> impl Strategy<Value = MindmapNode> {
    let label = proptest::option::of(any::<String>());
    let leaf = label.clone().prop_map(|text| MindmapNode {
        text,
        children: Vec::new(),
    });
    leaf.prop_recursive(5, 48, 4, move |inner| {
        (label.clone(), prop::collection::vec(inner, 0..4))
            .prop_map(|(text, children)| MindmapNode { text, children })
    })
}

/// Reference pre-order listing of (label, depth)
fn preorder(node: &MindmapNode, depth: usize, out: &mut Vec<(String, usize)>) {
    out.push((node.text().to_string(), depth));
    for child in node.children() {
        preorder(child, depth + 1, out);
    }
}

proptest! {
    #[test]
    fn flatten_visits_every_node_at_its_depth(tree in arb_tree()) {
        let records = flatten(Some(&tree));
        prop_assert_eq!(records.len(), tree.count_nodes());

        let mut expected = Vec::new();
        preorder(&tree, 0, &mut expected);
        let actual: Vec<_> = records.iter().map(|r| (r.text.clone(), r.depth)).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn table_rows_are_rectangular(tree in arb_tree()) {
        let table = to_table(&tree).unwrap();
        let max_depth = tree.max_depth();

        prop_assert_eq!(table.max_depth(), max_depth);
        prop_assert_eq!(table.headers().len(), 4 + max_depth + 1);

        let rows = table.rows();
        prop_assert_eq!(rows.len(), tree.count_nodes());
        for row in &rows {
            prop_assert_eq!(row.len(), 4 + max_depth + 1);
        }
    }

    #[test]
    fn level_cells_rebuild_path(tree in arb_tree()) {
        let table = to_table(&tree).unwrap();
        for (index, row) in table.rows().iter().enumerate() {
            let filled: Vec<&str> = row[4..]
                .iter()
                .filter(|cell| !cell.is_empty())
                .map(String::as_str)
                .collect();
            prop_assert_eq!(filled.len(), 1);
            prop_assert!(row[1].ends_with(filled[0]));
            prop_assert_eq!(table.path_from_levels(index), Some(row[1].clone()));
        }
    }

    #[test]
    fn level_cell_matches_depth(tree in arb_tree()) {
        let table = to_table(&tree).unwrap();
        for record in table.records() {
            prop_assert_eq!(&record.levels[record.depth], &record.text);
            prop_assert_eq!(record.level_text(), record.text.as_str());
            prop_assert!(record.path.ends_with(record.text.as_str()));
            prop_assert_eq!(record.has_children, record.children_count > 0);
        }
    }

    #[test]
    fn transforms_are_idempotent(tree in arb_tree()) {
        prop_assert_eq!(flatten(Some(&tree)), flatten(Some(&tree)));
        prop_assert_eq!(to_table(&tree).unwrap(), to_table(&tree).unwrap());
        prop_assert_eq!(to_table(&tree).unwrap().to_csv(), to_table(&tree).unwrap().to_csv());
    }

    #[test]
    fn codec_round_trips_trees(tree in arb_loose_tree()) {
        let codec = TransportCodec::default();
        let encoded = codec.encode(&tree).unwrap();
        let decoded: MindmapNode = codec.decode(&encoded).unwrap();
        prop_assert_eq!(decoded, tree);
    }

    #[test]
    fn codec_round_trips_documents(tree in arb_tree(), title in any::<String>()) {
        let mindmap = Mindmap::new(tree).with_metadata("title", title);
        let codec = TransportCodec::new().with_alphabet(Alphabet::UrlSafe);

        let encoded = codec.encode(&mindmap).unwrap();
        prop_assert!(encoded.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));

        let decoded: Mindmap = codec.decode(&encoded).unwrap();
        prop_assert_eq!(decoded, mindmap);
    }

    #[test]
    fn codec_round_trips_text(text in any::<String>()) {
        let codec = TransportCodec::default();
        prop_assert_eq!(codec.decode_text(&codec.encode_text(&text)).unwrap(), text);
    }
}
