use crate::analysis::config::AnalysisConfig;
use crate::error::{MindmapError, Result};
use serde::{Deserialize, Serialize};

/// One chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of a chat-completions request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl ChatRequest {
    /// Request analysing `prompt` with the configured model and system message
    pub fn for_analysis(config: &AnalysisConfig, prompt: impl Into<String>) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![ChatMessage::system(config.system_prompt()), ChatMessage::user(prompt)],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            stream: None,
        }
    }

    /// Builder method: ask for server-sent event streaming
    pub fn streaming(mut self) -> Self {
        self.stream = Some(true);
        self
    }
}

/// Token accounting reported by the endpoint
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Text produced by the model plus usage numbers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisOutcome {
    pub analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
    #[serde(default)]
    usage: Option<Usage>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Parse a non-streaming chat-completions response body
pub fn parse_response(body: &str) -> Result<AnalysisOutcome> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| MindmapError::ResponseParse(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(MindmapError::ResponseParse(format!("API error: {}", error.message)));
    }

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| MindmapError::ResponseParse("response contains no choices".to_string()))?;

    Ok(AnalysisOutcome {
        analysis: choice.message.content,
        usage: response.usage,
    })
}

/// Extract content deltas from a chunk of server-sent events
///
/// `[DONE]` markers, keep-alive lines and malformed events are skipped.
pub fn parse_stream_chunk(chunk: &str) -> Vec<String> {
    chunk
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .filter(|data| !data.is_empty() && *data != "[DONE]")
        .filter_map(|data| match serde_json::from_str::<StreamChunk>(data) {
            Ok(event) => event.choices.into_iter().next().and_then(|c| c.delta.content),
            Err(e) => {
                log::warn!("Skipping malformed stream event: {}", e);
                None
            }
        })
        .filter(|content| !content.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body() {
        let config = AnalysisConfig::default();
        let request = ChatRequest::for_analysis(&config, "Describe this");

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "gpt-5-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1], json!({"role": "user", "content": "Describe this"}));
        assert_eq!(body["max_tokens"], 2000);
        assert!(body.get("stream").is_none());

        let streaming = serde_json::to_value(request.streaming()).unwrap();
        assert_eq!(streaming["stream"], true);
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "A summary"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;

        let outcome = parse_response(body).unwrap();
        assert_eq!(outcome.analysis, "A summary");
        assert_eq!(outcome.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_parse_response_errors() {
        let err = parse_response(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, MindmapError::ResponseParse(_)));

        let err = parse_response(r#"{"error": {"message": "Invalid API key"}}"#).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse model response: API error: Invalid API key");

        assert!(parse_response("<html>").is_err());
    }

    #[test]
    fn test_parse_stream_chunk() {
        let chunk = "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n\
                     data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\
                     : keep-alive\n\
                     data: {broken\n\
                     data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\
                     data: [DONE]\n";

        assert_eq!(parse_stream_chunk(chunk), vec!["Hel", "lo"]);
    }
}
