//! Mindmap analysis prompts
//!
//! Builds the natural-language description of a mindmap and the
//! chat-completions request that carries it. Sending the request is left to
//! the caller; this module only shapes the body and parses the reply.

pub mod config;
pub mod prompt;
pub mod request;

pub use config::AnalysisConfig;
pub use prompt::{AnalysisType, PromptBuilder};
pub use request::{
    AnalysisOutcome, ChatMessage, ChatRequest, Usage, parse_response, parse_stream_chunk,
};

use crate::mindmap::node::MindmapNode;

/// Build the full request body for analysing a mindmap
pub fn analysis_request(
    root: Option<&MindmapNode>,
    kind: AnalysisType,
    config: &AnalysisConfig,
) -> ChatRequest {
    let prompt = PromptBuilder::new().build(root, kind);
    log::debug!("Built {} prompt ({} bytes)", kind, prompt.len());
    ChatRequest::for_analysis(config, prompt)
}
