//! Named operations over an extracted mindmap
//!
//! Each tool takes JSON parameters, runs against a [`ToolContext`] holding the
//! current mindmap, and answers with a [`ToolResult`] envelope
//! (`{"success": ..., "data": ..., "error": ...}`), which is the shape the
//! extension surfaces exchange.

pub mod export;
pub mod prompt;
pub mod stats;
pub mod transport;

pub use export::{
    ExportCsvParams, ExportCsvTool, ExportJsonParams, ExportJsonTool, ExportOutlineParams,
    ExportOutlineTool,
};
pub use prompt::{BuildPromptParams, BuildPromptTool};
pub use stats::{TreeStatsParams, TreeStatsTool};
pub use transport::{
    DecodePayloadParams, DecodePayloadTool, EncodePayloadParams, EncodePayloadTool,
    ViewerUrlParams, ViewerUrlTool,
};

use crate::analysis::config::AnalysisConfig;
use crate::error::{MindmapError, Result};
use crate::mindmap::flatten::FlatRecord;
use crate::mindmap::tree::Mindmap;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// Successful result without data
    pub fn success() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// Successful result carrying data
    pub fn success_with(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed result with a message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// State shared by tools during one invocation
pub struct ToolContext<'a> {
    /// Mindmap the tools operate on
    pub mindmap: &'a Mindmap,

    /// Settings for analysis prompts
    pub config: AnalysisConfig,

    records: Option<Vec<FlatRecord>>,
}

impl<'a> ToolContext<'a> {
    pub fn new(mindmap: &'a Mindmap) -> Self {
        Self {
            mindmap,
            config: AnalysisConfig::default(),
            records: None,
        }
    }

    /// Builder method: set analysis settings
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Flattened records of the mindmap, computed on first use
    pub fn records(&mut self) -> &[FlatRecord] {
        let mindmap = self.mindmap;
        self.records.get_or_insert_with(|| mindmap.flatten())
    }
}

/// An operation that can be invoked by name with JSON parameters
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    /// Name the tool is registered under
    fn name(&self) -> &str;

    /// JSON schema of the parameters
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }

    /// Run with already-parsed parameters
    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// Parse parameters and run
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let params: Self::Params =
            serde_json::from_value(params).map_err(|e| MindmapError::InvalidParams {
                tool: self.name().to_string(),
                reason: e.to_string(),
            })?;
        self.execute_typed(params, context)
    }
}

/// Object-safe view of [`Tool`] used by the registry
trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        Tool::execute(self, params, context)
    }
}

/// Tools indexed by name, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ExportJsonTool);
        registry.register(ExportCsvTool);
        registry.register(ExportOutlineTool);
        registry.register(EncodePayloadTool);
        registry.register(DecodePayloadTool);
        registry.register(ViewerUrlTool);
        registry.register(BuildPromptTool);
        registry.register(TreeStatsTool);
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = Tool::name(&tool).to_string();
        self.tools.insert(name, Box::new(tool));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Parameter schema of a registered tool
    pub fn schema(&self, name: &str) -> Option<Value> {
        self.tools.get(name).map(|tool| tool.parameters_schema())
    }

    /// Execute a tool by name
    pub fn execute(
        &self,
        name: &str,
        params: Value,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| MindmapError::UnknownTool(name.to_string()))?;

        log::debug!("Executing tool '{}'", tool.name());
        tool.execute(params, context)
    }

    /// Execute a tool by name, folding any error into a failed [`ToolResult`]
    pub fn dispatch(&self, name: &str, params: Value, context: &mut ToolContext) -> ToolResult {
        match self.execute(name, params, context) {
            Ok(result) => result,
            Err(e) => {
                log::debug!("Tool '{}' failed: {}", name, e);
                ToolResult::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mindmap::node::MindmapNode;
    use serde_json::json;

    fn create_test_mindmap() -> Mindmap {
        Mindmap::new(MindmapNode::new("Root").with_children(vec![
            MindmapNode::new("A"),
            MindmapNode::new("B").with_children(vec![MindmapNode::new("B1")]),
        ]))
    }

    #[test]
    fn test_registry_defaults() {
        let registry = ToolRegistry::with_defaults();

        assert_eq!(
            registry.names(),
            vec![
                "export_json",
                "export_csv",
                "export_outline",
                "encode_payload",
                "decode_payload",
                "viewer_url",
                "build_prompt",
                "tree_stats"
            ]
        );
        assert_eq!(registry.len(), 8);
        assert!(registry.contains("export_csv"));
        assert!(registry.schema("export_outline").unwrap().is_object());
    }

    #[test]
    fn test_unknown_tool() {
        let registry = ToolRegistry::with_defaults();
        let mindmap = create_test_mindmap();
        let mut context = ToolContext::new(&mindmap);

        let err = registry.execute("expand_all", json!({}), &mut context).unwrap_err();
        assert!(matches!(err, MindmapError::UnknownTool(_)));

        let result = registry.dispatch("expand_all", json!({}), &mut context);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Unknown tool: expand_all"));
    }

    #[test]
    fn test_invalid_params() {
        let registry = ToolRegistry::with_defaults();
        let mindmap = create_test_mindmap();
        let mut context = ToolContext::new(&mindmap);

        let err = registry
            .execute("decode_payload", json!({"payload": 5}), &mut context)
            .unwrap_err();
        assert!(matches!(err, MindmapError::InvalidParams { .. }));
    }

    #[test]
    fn test_context_caches_records() {
        let mindmap = create_test_mindmap();
        let mut context = ToolContext::new(&mindmap);

        assert_eq!(context.records().len(), 4);
        assert_eq!(context.records()[3].text, "B1");
    }

    #[test]
    fn test_tool_result_serialization() {
        let json = serde_json::to_value(ToolResult::failure("boom")).unwrap();
        assert_eq!(json, json!({"success": false, "error": "boom"}));

        let json = serde_json::to_value(ToolResult::success()).unwrap();
        assert_eq!(json, json!({"success": true}));
    }
}
