use crate::mindmap::flatten::FlatRecord;

/// Renders flattened records as an indented bullet list
///
/// The output is embedded verbatim in analysis prompts, so identical records
/// always produce byte-identical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineFormatter {
    /// Indentation repeated once per depth level
    pub indent: String,

    /// Marker placed before each label
    pub bullet: String,

    /// Word used in the child count annotation, e.g. `(3 subnodes)`
    pub children_label: String,
}

impl Default for OutlineFormatter {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            bullet: "•".to_string(),
            children_label: "subnodes".to_string(),
        }
    }
}

impl OutlineFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set indentation unit
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Builder method: set bullet marker
    pub fn bullet(mut self, bullet: impl Into<String>) -> Self {
        self.bullet = bullet.into();
        self
    }

    /// Builder method: set child count label
    pub fn children_label(mut self, label: impl Into<String>) -> Self {
        self.children_label = label.into();
        self
    }

    /// Format a single record as one outline line
    pub fn format_line(&self, record: &FlatRecord) -> String {
        let mut line = self.indent.repeat(record.depth);
        line.push_str(&self.bullet);
        line.push(' ');
        line.push_str(&record.text);
        if record.children_count > 0 {
            line.push_str(&format!(" ({} {})", record.children_count, self.children_label));
        }
        line
    }

    /// Format all records, one line each, without a trailing newline
    pub fn format(&self, records: &[FlatRecord]) -> String {
        records
            .iter()
            .map(|record| self.format_line(record))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Format records with the default outline style
pub fn format_outline(records: &[FlatRecord]) -> String {
    OutlineFormatter::default().format(records)
}
