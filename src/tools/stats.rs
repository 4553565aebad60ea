use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for tree statistics (no parameters needed)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TreeStatsParams {}

/// Tool reporting node count, depth and leaf count
#[derive(Default)]
pub struct TreeStatsTool;

impl Tool for TreeStatsTool {
    type Params = TreeStatsParams;

    fn name(&self) -> &str {
        "tree_stats"
    }

    fn execute_typed(
        &self,
        _params: TreeStatsParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let stats = context.mindmap.stats();
        Ok(ToolResult::success_with(serde_json::to_value(stats)?))
    }
}
