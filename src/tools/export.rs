use crate::error::Result;
use crate::export::outline::OutlineFormatter;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for exporting the mindmap as JSON
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportJsonParams {
    /// Pretty-print the output (default: true)
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

/// Tool returning the extracted document as JSON text
#[derive(Default)]
pub struct ExportJsonTool;

impl Tool for ExportJsonTool {
    type Params = ExportJsonParams;

    fn name(&self) -> &str {
        "export_json"
    }

    fn execute_typed(
        &self,
        params: ExportJsonParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let json = if params.pretty {
            context.mindmap.to_json()?
        } else {
            context.mindmap.to_compact_json()?
        };

        Ok(ToolResult::success_with(serde_json::json!({
            "json": json,
            "length": json.len()
        })))
    }
}

/// Parameters for CSV export (no parameters needed)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportCsvParams {}

/// Tool producing spreadsheet-ready CSV
#[derive(Default)]
pub struct ExportCsvTool;

impl Tool for ExportCsvTool {
    type Params = ExportCsvParams;

    fn name(&self) -> &str {
        "export_csv"
    }

    fn execute_typed(
        &self,
        _params: ExportCsvParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let table = context.mindmap.to_table()?;

        Ok(ToolResult::success_with(serde_json::json!({
            "csv": table.to_csv(),
            "rows": table.records().len(),
            "columns": table.column_count(),
            "max_depth": table.max_depth()
        })))
    }
}

/// Parameters for the outline export
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExportOutlineParams {
    /// Indentation per level (default: two spaces)
    #[serde(default)]
    pub indent: Option<String>,

    /// Bullet marker (default: "•")
    #[serde(default)]
    pub bullet: Option<String>,

    /// Word used in child count annotations (default: "subnodes")
    #[serde(default)]
    pub children_label: Option<String>,
}

/// Tool rendering the mindmap as an indented outline
#[derive(Default)]
pub struct ExportOutlineTool;

impl Tool for ExportOutlineTool {
    type Params = ExportOutlineParams;

    fn name(&self) -> &str {
        "export_outline"
    }

    fn execute_typed(
        &self,
        params: ExportOutlineParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let mut formatter = OutlineFormatter::default();
        if let Some(indent) = params.indent {
            formatter = formatter.indent(indent);
        }
        if let Some(bullet) = params.bullet {
            formatter = formatter.bullet(bullet);
        }
        if let Some(label) = params.children_label {
            formatter = formatter.children_label(label);
        }

        let records = context.records();
        let outline = formatter.format(records);

        Ok(ToolResult::success_with(serde_json::json!({
            "outline": outline,
            "lines": records.len()
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mindmap::{Mindmap, MindmapNode};
    use serde_json::json;

    fn create_test_mindmap() -> Mindmap {
        Mindmap::new(MindmapNode::new("Root").with_children(vec![
            MindmapNode::new("A"),
            MindmapNode::new("B").with_children(vec![MindmapNode::new("B1")]),
        ]))
    }

    #[test]
    fn test_export_json_params_default() {
        let params: ExportJsonParams = serde_json::from_value(json!({})).unwrap();
        assert!(params.pretty);
    }

    #[test]
    fn test_export_json() {
        let mindmap = create_test_mindmap();
        let mut context = ToolContext::new(&mindmap);

        let result = ExportJsonTool
            .execute_typed(ExportJsonParams { pretty: false }, &mut context)
            .unwrap();
        let data = result.data.unwrap();
        let json = data["json"].as_str().unwrap();

        assert!(json.starts_with(r#"{"data":{"text":"Root""#));
        assert_eq!(data["length"], json.len());
    }

    #[test]
    fn test_export_csv() {
        let mindmap = create_test_mindmap();
        let mut context = ToolContext::new(&mindmap);

        let result = ExportCsvTool.execute(json!({}), &mut context).unwrap();
        assert!(result.success);

        let data = result.data.unwrap();
        assert_eq!(data["rows"], 4);
        assert_eq!(data["columns"], 7);
        assert!(data["csv"].as_str().unwrap().ends_with("2,Root > B > B1,NO,0,,,B1"));
    }

    #[test]
    fn test_export_csv_rejects_unlabeled_root() {
        let mindmap = Mindmap::new(MindmapNode::untitled());
        let mut context = ToolContext::new(&mindmap);

        assert!(ExportCsvTool.execute(json!({}), &mut context).is_err());
    }

    #[test]
    fn test_export_outline() {
        let mindmap = create_test_mindmap();
        let mut context = ToolContext::new(&mindmap);

        let result = ExportOutlineTool
            .execute(json!({"bullet": "*", "children_label": "children"}), &mut context)
            .unwrap();
        let data = result.data.unwrap();

        assert_eq!(data["lines"], 4);
        assert_eq!(
            data["outline"],
            "* Root (2 children)\n  * A\n  * B (1 children)\n    * B1"
        );
    }

    #[test]
    fn test_tool_metadata() {
        assert_eq!(ExportJsonTool.name(), "export_json");
        assert_eq!(ExportCsvTool.name(), "export_csv");
        assert!(ExportOutlineTool.parameters_schema().is_object());
    }
}
