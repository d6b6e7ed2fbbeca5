//! Configuration schema for config.toml.

use serde::{Deserialize, Serialize};

/// Placeholder value shipped in sample `.env` files.
pub const PLACEHOLDER_KEY: &str = "your_api_key_here";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Chat-completions API key (client side).
    pub llm_api_key: String,

    /// OpenAI-compatible chat-completions base URL.
    pub llm_api_url: String,

    /// Model driving the agent.
    pub llm_model: String,

    /// Maximum tokens per inference turn.
    pub max_tokens_per_turn: u32,

    /// Maximum inference rounds per user query.
    pub max_agent_turns: u32,

    /// Timeout for each chat-completions request.
    pub llm_timeout_secs: u64,

    /// OpenWeatherMap API key (server side).
    pub weather_api_key: String,

    /// OpenWeatherMap current-weather endpoint.
    pub weather_api_url: String,

    /// Language code for upstream descriptions.
    pub weather_lang: String,

    /// Timeout for each upstream weather call.
    pub weather_timeout_secs: u64,

    /// Timeout for client calls to the MCP server.
    pub mcp_timeout_secs: u64,

    /// Address the server binds to.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_url: "https://api.deepseek.com".into(),
            llm_model: "deepseek-chat".into(),
            max_tokens_per_turn: 1024,
            max_agent_turns: 5,
            llm_timeout_secs: 60,
            weather_api_key: String::new(),
            weather_api_url: "https://api.openweathermap.org/data/2.5/weather".into(),
            weather_lang: "zh_cn".into(),
            weather_timeout_secs: 10,
            mcp_timeout_secs: 10,
            host: "127.0.0.1".into(),
            port: crate::launcher::DEFAULT_PORT,
            log_level: "info".into(),
        }
    }
}

impl AppConfig {
    /// Overlay values from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DEEPSEEK_API_KEY") {
            self.llm_api_key = v;
        }
        if let Some(v) = lookup("LLM_API_URL") {
            self.llm_api_url = v;
        }
        if let Some(v) = lookup("LLM_MODEL") {
            self.llm_model = v;
        }
        if let Some(v) = lookup("OPENWEATHERMAP_API_KEY") {
            self.weather_api_key = v;
        }
        if let Some(v) = lookup("OPENWEATHERMAP_API_URL") {
            self.weather_api_url = v;
        }
        if let Some(port) = lookup("MCP_PORT").and_then(|v| v.parse().ok()) {
            self.port = port;
        }
    }

    /// URL of the MCP endpoint on a local server at `port`.
    pub fn mcp_url(&self, port: u16) -> String {
        format!("http://localhost:{}{}", port, crate::mcp::MCP_PATH)
    }
}

/// Whether a configured secret is usable.
pub fn is_key_set(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != PLACEHOLDER_KEY
}
