use crate::analysis::prompt::{AnalysisType, PromptBuilder};
use crate::analysis::request::ChatRequest;
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for building an analysis prompt
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BuildPromptParams {
    /// One of "summary", "insights", "questions", "expand"; anything else asks
    /// for a general analysis (default: "summary")
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Also return the chat-completions request body (default: false)
    #[serde(default)]
    pub include_request: bool,
}

fn default_kind() -> String {
    AnalysisType::Summary.as_str().to_string()
}

/// Tool building the prompt sent to the summarization model
#[derive(Default)]
pub struct BuildPromptTool;

impl Tool for BuildPromptTool {
    type Params = BuildPromptParams;

    fn name(&self) -> &str {
        "build_prompt"
    }

    fn execute_typed(
        &self,
        params: BuildPromptParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let kind = AnalysisType::from(params.kind.as_str());
        let prompt = PromptBuilder::new().build(Some(context.mindmap.root()), kind);

        let mut data = serde_json::json!({
            "kind": kind.as_str(),
            "prompt": prompt,
        });

        if params.include_request {
            let request = ChatRequest::for_analysis(&context.config, prompt);
            data["endpoint"] = serde_json::json!(context.config.chat_completions_url());
            data["request"] = serde_json::to_value(&request)?;
        }

        Ok(ToolResult::success_with(data))
    }
}
