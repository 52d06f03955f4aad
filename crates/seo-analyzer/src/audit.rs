use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;

use seo_plugins::{PageSignals, SignalExtractor};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::fetcher::{FetchError, PageFetcher, normalize_url};
use crate::recommendation::Recommender;

/// Successful on-page audit, serialized flat for the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    #[serde(flatten)]
    pub signals: PageSignals,
    pub url: String,
    pub recommendations: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFailure {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditErrorKind {
    Validation,
    Fetch,
    Unexpected,
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{0}")]
    Unexpected(String),
}

impl AuditError {
    pub fn kind(&self) -> AuditErrorKind {
        match self {
            AuditError::Validation(_) => AuditErrorKind::Validation,
            AuditError::Fetch(_) => AuditErrorKind::Fetch,
            AuditError::Unexpected(_) => AuditErrorKind::Unexpected,
        }
    }

    /// Message shown to the caller.
    pub fn public_message(&self) -> String {
        match self {
            AuditError::Validation(message) => message.clone(),
            AuditError::Fetch(FetchError::SessionStart(e)) => format!(
                "Could not start browser session. Please ensure Chrome or Chromium is installed. Error: {e}"
            ),
            AuditError::Fetch(e) => {
                format!("An unexpected error occurred during analysis: {e}")
            }
            AuditError::Unexpected(e) => {
                format!("An unexpected error occurred during analysis: {e}")
            }
        }
    }
}

impl From<AuditError> for AuditFailure {
    fn from(err: AuditError) -> Self {
        AuditFailure {
            error: err.public_message(),
        }
    }
}

/// Runs fetch, extract and recommend for one URL.
pub struct Auditor {
    fetcher: PageFetcher,
    extractor: Arc<SignalExtractor>,
    recommender: Recommender,
}

impl Auditor {
    pub fn new(fetcher: PageFetcher, recommender: Recommender) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(SignalExtractor::default()),
            recommender,
        }
    }

    pub fn with_extractor(mut self, extractor: SignalExtractor) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Every error ends up as an [`AuditFailure`]; recommendation problems do not.
    pub async fn audit(&self, raw_url: &str) -> Result<AuditResult, AuditFailure> {
        self.try_audit(raw_url).await.map_err(|err| {
            error!(url = raw_url, kind = ?err.kind(), error = %err, "audit failed");
            AuditFailure::from(err)
        })
    }

    #[instrument(skip(self))]
    pub async fn try_audit(&self, raw_url: &str) -> Result<AuditResult, AuditError> {
        if raw_url.trim().is_empty() {
            return Err(AuditError::Validation("URL is required".to_string()));
        }
        let url = normalize_url(raw_url);

        let html = self.fetcher.fetch(&url).await?;

        let extractor = Arc::clone(&self.extractor);
        let signals = tokio::task::spawn_blocking(move || extractor.extract(&html))
            .await
            .map_err(|e| AuditError::Unexpected(e.to_string()))?;

        // Recommendation runs inline, so a panic has to be caught here.
        let recommendations = AssertUnwindSafe(self.recommender.recommend(&url, &signals))
            .catch_unwind()
            .await
            .map_err(|panic| AuditError::Unexpected(panic_message(panic.as_ref())))?
            .into_text();
        info!(url = %url, "audit complete");

        Ok(AuditResult {
            signals,
            url,
            recommendations,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "recommendation task panicked".to_string()
    }
}
