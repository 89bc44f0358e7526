use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Contains only secrets and env-specific values; model names,
/// evaluation weights, and prompts live in the TOML FileConfig.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    /// Override for OpenAI-compatible endpoints (proxies, local models).
    pub openai_base_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY environment variable not set")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL").ok(),
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let n = val.len().min(5);
            format!("{}...({} chars)", &val[..n], val.len())
        }
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => preview(v),
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  OPENAI_API_KEY: {}", preview(&self.openai_api_key));
        tracing::info!("  OPENAI_BASE_URL: {}", preview_opt(&self.openai_base_url));
    }
}
