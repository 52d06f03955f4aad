use std::{env, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const GEMINI_MODEL_ENV: &str = "GEMINI_MODEL";
pub const CHROME_PATH_ENV: &str = "CHROME_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// How long to wait for `<body>` after navigation.
    pub render_timeout_ms: u64,
    /// Upper bound on a single recommendation request.
    pub generation_timeout_ms: u64,
    pub user_agent: String,
    /// Explicit browser executable; resolved from the system when unset.
    pub browser_path: Option<PathBuf>,
    #[serde(skip_serializing)]
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl AnalyzerConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.gemini_api_key = non_empty_var(GEMINI_API_KEY_ENV);
        if let Some(model) = non_empty_var(GEMINI_MODEL_ENV) {
            config.gemini_model = model;
        }
        config.browser_path = non_empty_var(CHROME_PATH_ENV).map(PathBuf::from);
        config
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            render_timeout_ms: 10_000,
            generation_timeout_ms: 30_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            browser_path: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
