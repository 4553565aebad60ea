use thiserror::Error;

/// Errors produced by the mindmap export pipeline
#[derive(Debug, Error)]
pub enum MindmapError {
    /// The tree handed to an exporter cannot produce a well-formed table
    #[error("Invalid mindmap structure: {0}")]
    InvalidStructure(String),

    /// A transport string could not be turned back into a payload
    #[error("Failed to decode transport payload at {stage} stage: {reason}")]
    DecodeFailed { stage: DecodeStage, reason: String },

    /// Input text was not valid JSON
    #[error("Invalid JSON input: {0}")]
    Parse(#[source] serde_json::Error),

    /// Serializing a payload or export to JSON failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A viewer base URL could not be parsed
    #[error("Invalid viewer URL: {0}")]
    InvalidUrl(String),

    /// Reading input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No tool registered under the requested name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool parameters did not match the tool's schema
    #[error("Invalid parameters for tool '{tool}': {reason}")]
    InvalidParams { tool: String, reason: String },

    /// A language-model response did not have the expected shape
    #[error("Failed to parse model response: {0}")]
    ResponseParse(String),
}

/// Stage of the transport pipeline at which decoding failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    Base64,
    Utf8,
    Percent,
    Json,
}

impl std::fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DecodeStage::Base64 => "base64",
            DecodeStage::Utf8 => "utf8",
            DecodeStage::Percent => "percent",
            DecodeStage::Json => "json",
        };
        f.write_str(name)
    }
}

/// Result type alias for mindmap operations
pub type Result<T> = std::result::Result<T, MindmapError>;
