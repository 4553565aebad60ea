use crate::error::{MindmapError, Result};
use crate::mindmap::node::MindmapNode;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Separator between ancestor labels in the `Path` column
pub const PATH_SEPARATOR: &str = " > ";

/// Columns present in every table, before the per-depth `Level_n` columns
pub const FIXED_HEADERS: [&str; 4] = ["Depth", "Path", "Has_Children", "Children_Count"];

/// One node of the tree as a table row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableRow {
    pub depth: usize,

    /// Labels from the root down to this node, joined by [`PATH_SEPARATOR`]
    pub path: String,

    pub text: String,

    pub children_count: usize,

    pub has_children: bool,

    /// `Level_0..=Level_max` cells; only `levels[depth]` is non-empty
    pub levels: Vec<String>,
}

impl TableRow {
    /// Cell values in header order
    pub fn cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(FIXED_HEADERS.len() + self.levels.len());
        cells.push(self.depth.to_string());
        cells.push(self.path.clone());
        cells.push(if self.has_children { "YES" } else { "NO" }.to_string());
        cells.push(self.children_count.to_string());
        cells.extend(self.levels.iter().cloned());
        cells
    }

    /// The single non-empty level cell
    ///
    /// Empty when `levels` has no cell at `depth`, which only happens for rows
    /// that were not produced by [`to_table`].
    pub fn level_text(&self) -> &str {
        self.levels.get(self.depth).map_or("", String::as_str)
    }
}

/// A mindmap flattened into a rectangular table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    max_depth: usize,
    headers: Vec<String>,
    records: Vec<TableRow>,
}

impl Table {
    /// Deepest level present, which fixes the number of `Level_n` columns
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Typed rows in traversal order
    pub fn records(&self) -> &[TableRow] {
        &self.records
    }

    /// Row cells in traversal order, each `column_count()` wide
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.records.iter().map(TableRow::cells).collect()
    }

    /// Rebuild a row's path from level cells alone
    ///
    /// Each row only holds its own label, so ancestors are recovered by
    /// filling every level column down from the nearest row above.
    pub fn path_from_levels(&self, index: usize) -> Option<String> {
        let row = self.records.get(index)?;
        let mut segments = vec![row.level_text()];
        let mut wanted = row.depth;

        for above in self.records[..index].iter().rev() {
            if wanted == 0 {
                break;
            }
            if above.depth == wanted - 1 {
                segments.push(above.level_text());
                wanted -= 1;
            }
        }

        segments.reverse();
        Some(segments.join(PATH_SEPARATOR))
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Render as comma separated text, header line first, no trailing newline
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.records.len() + 1);
        lines.push(csv_line(&self.headers));
        lines.extend(self.records.iter().map(|row| csv_line(&row.cells())));
        lines.join("\n")
    }
}

/// Row data gathered on the first pass, before the column count is known
struct RowDraft {
    depth: usize,
    path: String,
    text: String,
    children_count: usize,
}

/// Export a tree as a table
///
/// The root must carry a non-empty label; without one the table has no
/// meaningful first row and [`MindmapError::InvalidStructure`] is returned.
/// Deeper nodes without a label are exported under the placeholder label.
pub fn to_table(root: &MindmapNode) -> Result<Table> {
    match root.label() {
        Some(label) if !label.is_empty() => {}
        _ => {
            return Err(MindmapError::InvalidStructure(
                "root node has no text".to_string(),
            ));
        }
    }

    let (drafts, max_depth) = collect_rows(root);

    let mut headers: Vec<String> = FIXED_HEADERS.iter().map(|h| h.to_string()).collect();
    headers.extend((0..=max_depth).map(|level| format!("Level_{}", level)));

    let records = drafts
        .into_iter()
        .map(|draft| {
            let mut levels = vec![String::new(); max_depth + 1];
            levels[draft.depth] = draft.text.clone();
            TableRow {
                depth: draft.depth,
                path: draft.path,
                text: draft.text,
                children_count: draft.children_count,
                has_children: draft.children_count > 0,
                levels,
            }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "Exported table with {} rows and {} columns",
        records.len(),
        headers.len()
    );

    Ok(Table {
        max_depth,
        headers,
        records,
    })
}

/// Pre-order walk returning the row drafts together with the deepest level seen
fn collect_rows(root: &MindmapNode) -> (Vec<RowDraft>, usize) {
    let mut drafts = Vec::new();
    let mut max_depth = 0;
    // Labels of the current node's ancestors, root first
    let mut ancestors: Vec<&str> = Vec::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        max_depth = max_depth.max(depth);

        ancestors.truncate(depth);
        ancestors.push(node.text());

        drafts.push(RowDraft {
            depth,
            path: ancestors.join(PATH_SEPARATOR),
            text: node.text().to_string(),
            children_count: node.children_count(),
        });

        stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
    }

    (drafts, max_depth)
}

/// Quote a field when it contains a comma, a quote or a newline
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",")
}
