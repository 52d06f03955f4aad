//! On-page SEO audit pipeline: render the page in headless Chrome, extract
//! signals from the DOM and ask Gemini for prioritized fixes.

pub mod audit;
pub mod browser;
pub mod config;
pub mod fetcher;
pub mod gemini;
pub mod recommendation;

use std::sync::Arc;

use tracing::warn;

pub use audit::{AuditError, AuditErrorKind, AuditFailure, AuditResult, Auditor};
pub use browser::{BrowserBinary, ChromeDriver};
pub use config::AnalyzerConfig;
pub use fetcher::{
    BrowserDriver, BrowserSession, FetchError, FetchOptions, PageFetcher, normalize_url,
};
pub use gemini::GeminiClient;
pub use recommendation::{GenerationError, Recommendation, Recommender, TextGenerator};
pub use seo_plugins::PageSignals;

impl AnalyzerConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            render_timeout: self.render_timeout(),
        }
    }

    /// `MissingCredential` when no API key is configured; otherwise the
    /// client, or the reason it could not be built.
    pub fn text_generator(&self) -> Result<Arc<dyn TextGenerator>, GenerationError> {
        let key = self
            .gemini_api_key
            .as_ref()
            .ok_or(GenerationError::MissingCredential)?;
        let client = GeminiClient::new(key.clone(), &self.gemini_model, &self.gemini_base_url)
            .inspect_err(|e| warn!(error = %e, "failed to build Gemini client"))?;
        Ok(Arc::new(client))
    }
}

impl Auditor {
    /// Production wiring: headless Chrome plus Gemini.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let binary = Arc::new(BrowserBinary::new(config.browser_path.clone()));
        Self::with_driver(config, Arc::new(ChromeDriver::new(binary)))
    }

    pub fn with_driver(config: &AnalyzerConfig, driver: Arc<dyn BrowserDriver>) -> Self {
        let fetcher = PageFetcher::new(driver, config.fetch_options());
        let recommender = Recommender::from_backend(config.text_generator(), config.generation_timeout());
        Auditor::new(fetcher, recommender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_requires_api_key() {
        let config = AnalyzerConfig::default();
        assert!(matches!(
            config.text_generator(),
            Err(GenerationError::MissingCredential)
        ));
    }

    #[test]
    fn test_generator_built_from_api_key() {
        let config = AnalyzerConfig {
            gemini_api_key: Some("key".to_string()),
            ..AnalyzerConfig::default()
        };
        assert!(config.text_generator().is_ok());
    }
}
