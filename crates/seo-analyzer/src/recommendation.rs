use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use seo_plugins::{
    PageSignals,
    plugins::{meta_description::META_DESCRIPTION_LENGTH, title::TITLE_LENGTH},
};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY not found")]
    MissingCredential,
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("model returned no text")]
    EmptyResponse,
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// A generative-text backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    Generated(String),
    /// Human readable reason the model could not be consulted.
    Unavailable(String),
}

impl Recommendation {
    pub fn is_generated(&self) -> bool {
        matches!(self, Recommendation::Generated(_))
    }

    pub fn into_text(self) -> String {
        match self {
            Recommendation::Generated(text) | Recommendation::Unavailable(text) => text,
        }
    }
}

pub struct Recommender {
    /// The error explains why no backend could be built.
    backend: Result<Arc<dyn TextGenerator>, GenerationError>,
    timeout: Duration,
}

impl Recommender {
    /// `None` means no credential was configured.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        Self::from_backend(generator.ok_or(GenerationError::MissingCredential), timeout)
    }

    pub fn from_backend(
        backend: Result<Arc<dyn TextGenerator>, GenerationError>,
        timeout: Duration,
    ) -> Self {
        Self { backend, timeout }
    }

    /// Never fails: backend problems come back as [`Recommendation::Unavailable`].
    pub async fn recommend(&self, url: &str, signals: &PageSignals) -> Recommendation {
        let generator = match &self.backend {
            Ok(generator) => generator,
            Err(GenerationError::MissingCredential) => {
                warn!("no Gemini credential configured, skipping recommendations");
                return Recommendation::Unavailable(
                    "Error: GEMINI_API_KEY not found. Please set it in the environment."
                        .to_string(),
                );
            }
            Err(e) => {
                warn!(url, error = %e, "recommendation backend unavailable");
                return unavailable(e);
            }
        };

        let prompt = build_prompt(url, signals);
        let result = match tokio::time::timeout(self.timeout, generator.generate(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout)),
        };

        match result {
            Ok(text) => Recommendation::Generated(text),
            Err(e) => {
                warn!(url, error = %e, "recommendation generation failed");
                unavailable(&e)
            }
        }
    }
}

fn unavailable(error: &GenerationError) -> Recommendation {
    Recommendation::Unavailable(format!(
        "Error: Could not generate AI recommendations. Details: {error}"
    ))
}

pub fn build_prompt(url: &str, signals: &PageSignals) -> String {
    let title = &signals.title;
    let meta = &signals.meta_description;
    let h1 = &signals.h1;
    let h1_tags = if h1.tags.is_empty() {
        "None".to_string()
    } else {
        h1.tags.join(", ")
    };

    format!(
        r#"You are an expert SEO strategist. Analyze the following on-page SEO data for the website {url}.
Provide a concise, actionable strategy to improve its search engine ranking.
Focus on the 2-3 most critical issues first.
Present your recommendations in a clear, easy-to-understand format using markdown.

Here is the data:
- **Title Tag:**
  - Text: "{title_text}"
  - Length: {title_len} (Recommended: {TITLE_LENGTH} characters)
  - Status: {title_status}

- **Meta Description:**
  - Text: "{meta_text}"
  - Length: {meta_len} (Recommended: {META_DESCRIPTION_LENGTH} characters)
  - Status: {meta_status}

- **H1 Tags:**
  - Count: {h1_count} (Recommended: 1)
  - Tags Found: {h1_tags}
  - Status: {h1_status}

- **Word Count:** {word_count} words.

- **Image SEO:** Found {images} images. {missing_alt} images are missing alt text.

Based on this data, provide your expert recommendations.
"#,
        title_text = title.text,
        title_len = title.length,
        title_status = title.status,
        meta_text = meta.text,
        meta_len = meta.length,
        meta_status = meta.status,
        h1_count = h1.count,
        h1_status = h1.status,
        word_count = signals.word_count,
        images = signals.images.len(),
        missing_alt = signals.images_missing_alt(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedGenerator {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(GenerationError::Api {
                    status: *status,
                    message: "quota exceeded".to_string(),
                }),
            }
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    fn signals() -> PageSignals {
        seo_plugins::extract(
            r#"<html><head><title>Example Domain</title></head>
            <body><h1>Example Domain</h1><h1>Second</h1><img src="/a.png"><img src="/b.png" alt="b"></body></html>"#,
        )
    }

    #[test]
    fn test_prompt_embeds_signals() {
        let prompt = build_prompt("https://example.com", &signals());

        assert!(prompt.contains("website https://example.com."));
        assert!(prompt.contains("Text: \"Example Domain\""));
        assert!(prompt.contains("Length: 14 (Recommended: 50-60 characters)"));
        assert!(prompt.contains("(Recommended: 150-160 characters)"));
        assert!(prompt.contains("Count: 2 (Recommended: 1)"));
        assert!(prompt.contains("Tags Found: Example Domain, Second"));
        assert!(prompt.contains("Found 2 images. 1 images are missing alt text."));
        assert!(prompt.contains("2-3 most critical issues"));
    }

    #[test]
    fn test_prompt_without_h1() {
        let prompt = build_prompt("https://x.com", &seo_plugins::extract("<p>hi</p>"));
        assert!(prompt.contains("Tags Found: None"));
        assert!(prompt.contains("Status: error"));
    }

    #[tokio::test]
    async fn test_missing_credential_degrades() {
        let recommender = Recommender::new(None, Duration::from_secs(1));
        let rec = recommender.recommend("https://x.com", &signals()).await;
        assert_eq!(
            rec,
            Recommendation::Unavailable(
                "Error: GEMINI_API_KEY not found. Please set it in the environment.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_generated_text_passes_through() {
        let generator = Arc::new(FixedGenerator {
            reply: Ok("## Fix your title".to_string()),
            prompts: Mutex::new(Vec::new()),
        });
        let recommender = Recommender::new(Some(generator.clone()), Duration::from_secs(1));

        let rec = recommender.recommend("https://x.com", &signals()).await;

        assert!(rec.is_generated());
        assert_eq!(rec.into_text(), "## Fix your title");
        assert_eq!(generator.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_backend_failure_is_described() {
        let generator = Arc::new(FixedGenerator {
            reply: Err(429),
            prompts: Mutex::new(Vec::new()),
        });
        let recommender = Recommender::new(Some(generator), Duration::from_secs(1));

        let text = recommender.recommend("https://x.com", &signals()).await.into_text();

        assert!(text.starts_with("Error: Could not generate AI recommendations. Details: "));
        assert!(text.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_broken_backend_is_not_reported_as_missing_key() {
        let recommender = Recommender::from_backend(
            Err(GenerationError::Network("tls backend failed to initialize".to_string())),
            Duration::from_secs(1),
        );
        let text = recommender.recommend("https://x.com", &signals()).await.into_text();

        assert!(!text.contains("GEMINI_API_KEY"));
        assert_eq!(
            text,
            "Error: Could not generate AI recommendations. Details: network error: tls backend failed to initialize"
        );
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let recommender = Recommender::new(Some(Arc::new(SlowGenerator)), Duration::from_millis(20));
        let rec = recommender.recommend("https://x.com", &signals()).await;

        assert!(!rec.is_generated());
        assert!(rec.into_text().contains("timed out"));
    }
}
