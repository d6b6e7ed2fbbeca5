pub mod schema;

pub use schema::AppConfig;

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Default config file location (before `~` expansion).
pub const DEFAULT_CONFIG_PATH: &str = "~/.weather-mcp/config.toml";

/// Expand `~` in a user-supplied path.
pub fn resolve_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load config from the given path (or defaults), then overlay `.env` and
/// process environment variables.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let mut config = load_file(path)?;

    // A missing .env is fine; secrets may come from the real environment.
    let _ = dotenvy::dotenv();
    config.apply_env(|name| std::env::var(name).ok());

    Ok(config)
}

/// Load the TOML file alone, or return defaults when it is absent.
pub fn load_file(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig =
            toml::from_str(&contents).context("Failed to parse config (TOML)")?;
        Ok(config)
    } else {
        Ok(AppConfig::default())
    }
}

/// The server cannot start without a weather key.
pub fn require_server_secrets(config: &AppConfig) -> Result<()> {
    if !schema::is_key_set(&config.weather_api_key) {
        bail!("OPENWEATHERMAP_API_KEY is not set (add it to .env or the environment)");
    }
    Ok(())
}

/// The client cannot start without an LLM key.
pub fn require_client_secrets(config: &AppConfig) -> Result<()> {
    if !schema::is_key_set(&config.llm_api_key) {
        bail!("DEEPSEEK_API_KEY is not set (add it to .env or the environment)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.port, 8765);
        assert_eq!(cfg.weather_lang, "zh_cn");
        assert_eq!(cfg.mcp_timeout_secs, 10);
        assert_eq!(cfg.llm_timeout_secs, 60);
        assert_eq!(cfg.mcp_url(8765), "http://localhost:8765/v1/mcp");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg: AppConfig = toml::from_str("port = 9000\nllm_model = \"m1\"").unwrap();
        assert_eq!(cfg.port, 9000);

        cfg.apply_env(env(&[
            ("DEEPSEEK_API_KEY", "sk-test"),
            ("OPENWEATHERMAP_API_KEY", "ow-test"),
            ("MCP_PORT", "9100"),
        ]));

        assert_eq!(cfg.llm_api_key, "sk-test");
        assert_eq!(cfg.weather_api_key, "ow-test");
        assert_eq!(cfg.port, 9100);
        assert_eq!(cfg.llm_model, "m1");
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(env(&[("MCP_PORT", "eighty")]));
        assert_eq!(cfg.port, 8765);
    }

    #[test]
    fn secrets_are_required() {
        let mut cfg = AppConfig::default();
        assert!(require_server_secrets(&cfg).is_err());
        assert!(require_client_secrets(&cfg).is_err());

        cfg.weather_api_key = schema::PLACEHOLDER_KEY.into();
        let err = require_server_secrets(&cfg).unwrap_err();
        assert!(err.to_string().contains("OPENWEATHERMAP_API_KEY"));

        cfg.weather_api_key = "real".into();
        cfg.llm_api_key = "real".into();
        assert!(require_server_secrets(&cfg).is_ok());
        assert!(require_client_secrets(&cfg).is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_file(Path::new("/nonexistent/weather-mcp.toml")).unwrap();
        assert_eq!(cfg.llm_model, "deepseek-chat");
    }
}
