//! Renders a page in a real browser and hands back the resulting HTML.
//!
//! The fetcher only talks to the [`BrowserDriver`] / [`BrowserSession`]
//! traits. Production code uses [`crate::browser::ChromeDriver`]; tests plug
//! in fakes to observe the session lifecycle.

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to start browser session: {0}")]
    SessionStart(String),
    #[error("Failed to navigate to URL: {0}")]
    Navigation(String),
    #[error("Timed out after {timeout:?} waiting for {url} to render")]
    Timeout { url: String, timeout: Duration },
    #[error("Failed to read rendered content: {0}")]
    Content(String),
    #[error("Browser task aborted: {0}")]
    Aborted(String),
}

/// Trims the input and defaults to `https://` when no scheme is given.
pub fn normalize_url(raw: &str) -> String {
    let url = raw.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// One isolated browser instance with a single tab.
pub trait BrowserSession: Send {
    fn set_user_agent(&mut self, user_agent: &str) -> Result<(), FetchError>;
    fn navigate(&mut self, url: &str) -> Result<(), FetchError>;
    /// Blocks until the navigation started by `navigate` has finished.
    fn wait_for_navigation(&mut self, timeout: Duration) -> Result<(), FetchError>;
    /// Blocks until `<body>` exists or `timeout` elapses.
    fn wait_for_body(&mut self, timeout: Duration) -> Result<(), FetchError>;
    fn content(&mut self) -> Result<String, FetchError>;
    /// Releases the browser. Must be safe to call more than once.
    fn close(&mut self);
}

pub trait BrowserDriver: Send + Sync + 'static {
    fn launch(&self) -> Result<Box<dyn BrowserSession>, FetchError>;
}

/// Owns a launched session and closes it on every exit path.
pub struct SessionGuard {
    session: Option<Box<dyn BrowserSession>>,
}

impl SessionGuard {
    pub fn acquire(driver: &dyn BrowserDriver) -> Result<Self, FetchError> {
        let session = driver.launch()?;
        Ok(Self {
            session: Some(session),
        })
    }

    pub fn session(&mut self) -> Result<&mut dyn BrowserSession, FetchError> {
        match self.session.as_mut() {
            Some(session) => Ok(session.as_mut()),
            None => Err(FetchError::Aborted(
                "browser session already released".to_string(),
            )),
        }
    }

    pub fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            debug!("browser session released");
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub render_timeout: Duration,
}

pub struct PageFetcher {
    driver: Arc<dyn BrowserDriver>,
    options: FetchOptions,
}

impl PageFetcher {
    pub fn new(driver: Arc<dyn BrowserDriver>, options: FetchOptions) -> Self {
        Self { driver, options }
    }

    /// Loads `url` (already normalized) and returns the rendered DOM.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let driver = Arc::clone(&self.driver);
        let options = self.options.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || render(driver.as_ref(), &url, &options))
            .await
            .map_err(|e| FetchError::Aborted(e.to_string()))?
    }
}

fn render(driver: &dyn BrowserDriver, url: &str, options: &FetchOptions) -> Result<String, FetchError> {
    let mut guard = SessionGuard::acquire(driver)?;
    let result = drive(guard.session()?, url, options);
    guard.release();

    match &result {
        Ok(html) => info!(url, bytes = html.len(), "page rendered"),
        Err(e) => warn!(url, error = %e, "page render failed"),
    }
    result
}

fn drive(
    session: &mut dyn BrowserSession,
    url: &str,
    options: &FetchOptions,
) -> Result<String, FetchError> {
    session.set_user_agent(&options.user_agent)?;
    session.navigate(url)?;
    session.wait_for_navigation(options.render_timeout)?;
    session.wait_for_body(options.render_timeout)?;
    session.content()
}
