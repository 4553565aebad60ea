use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-5-mini";

/// Settings for talking to a chat-completions endpoint
///
/// The crate never sends requests itself; these settings shape the request body
/// and tell the caller where to send it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Base URL of the endpoint, without the `/chat/completions` suffix
    pub base_url: String,

    /// Bearer token; there is no built-in default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Language the model should answer in
    pub language: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            language: "English".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Create config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `MINDMAP_MODEL`, keeping
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty("OPENAI_API_KEY") {
            config.api_key = Some(key);
        }
        if let Some(base_url) = non_empty("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(model) = non_empty("MINDMAP_MODEL") {
            config.model = model;
        }

        config
    }

    /// Builder method: set base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builder method: set API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Builder method: set model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder method: set temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Builder method: set max tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Builder method: set response language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Full URL of the chat-completions endpoint
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// System message sent ahead of every analysis prompt
    pub fn system_prompt(&self) -> String {
        format!(
            "You are an expert mindmap analyst. Analyze the provided mindmap structure \
             and provide insights in {} language.",
            self.language
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.model, "gpt-5-mini");
        assert_eq!(config.max_tokens, 2000);
        assert!(config.api_key.is_none());
        assert_eq!(config.chat_completions_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_builder() {
        let config = AnalysisConfig::new()
            .base_url("http://localhost:8080/v1/")
            .api_key("sk-test")
            .model("local-model")
            .temperature(0.2)
            .max_tokens(512)
            .language("Greek");

        assert_eq!(config.chat_completions_url(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.temperature, 0.2);
        assert!(config.system_prompt().ends_with("insights in Greek language."));
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("OPENAI_API_KEY", "sk-env"),
            ("OPENAI_BASE_URL", "https://proxy.example.com/v1"),
            ("MINDMAP_MODEL", "   "),
        ]);

        let config = AnalysisConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.base_url, "https://proxy.example.com/v1");
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
