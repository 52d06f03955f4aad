//! Headless Chrome backed [`BrowserDriver`].

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use headless_chrome::{Browser, LaunchOptions, Tab};
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::fetcher::{BrowserDriver, BrowserSession, FetchError};

type Resolver = Box<dyn Fn() -> Result<PathBuf, String> + Send + Sync>;

/// Locates the browser executable once per process.
///
/// Concurrent callers block on the same resolution. A failed lookup is not
/// remembered, so the next call tries again.
pub struct BrowserBinary {
    path: OnceCell<PathBuf>,
    resolver: Resolver,
}

impl BrowserBinary {
    /// Uses `explicit` when given, otherwise searches the system.
    pub fn new(explicit: Option<PathBuf>) -> Self {
        match explicit {
            Some(path) => Self::with_resolver(move || Ok(path.clone())),
            None => Self::with_resolver(headless_chrome::browser::default_executable),
        }
    }

    pub fn with_resolver<F>(resolver: F) -> Self
    where
        F: Fn() -> Result<PathBuf, String> + Send + Sync + 'static,
    {
        Self {
            path: OnceCell::new(),
            resolver: Box::new(resolver),
        }
    }

    pub fn resolve(&self) -> Result<&Path, FetchError> {
        self.path
            .get_or_try_init(|| {
                let path = (self.resolver)().map_err(FetchError::SessionStart)?;
                info!(path = %path.display(), "resolved browser executable");
                Ok(path)
            })
            .map(PathBuf::as_path)
    }
}

pub struct ChromeDriver {
    binary: Arc<BrowserBinary>,
    idle_timeout: Duration,
}

impl ChromeDriver {
    pub fn new(binary: Arc<BrowserBinary>) -> Self {
        Self {
            binary,
            idle_timeout: Duration::from_secs(60),
        }
    }

    fn launch_options(&self, path: &Path) -> Result<LaunchOptions<'static>, FetchError> {
        LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .path(Some(path.to_path_buf()))
            .idle_browser_timeout(self.idle_timeout)
            .args(vec![
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--enable-automation"),
            ])
            .build()
            .map_err(|e| FetchError::SessionStart(e.to_string()))
    }
}

impl BrowserDriver for ChromeDriver {
    fn launch(&self) -> Result<Box<dyn BrowserSession>, FetchError> {
        let path = self.binary.resolve()?;
        let options = self.launch_options(path)?;

        // No user data dir: every launch gets a fresh throwaway profile.
        let browser = Browser::new(options).map_err(|e| FetchError::SessionStart(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| FetchError::SessionStart(e.to_string()))?;
        debug!("browser session started");

        Ok(Box::new(ChromeSession {
            browser: Some(browser),
            tab,
            url: String::new(),
        }))
    }
}

pub struct ChromeSession {
    browser: Option<Browser>,
    tab: Arc<Tab>,
    url: String,
}

impl BrowserSession for ChromeSession {
    fn set_user_agent(&mut self, user_agent: &str) -> Result<(), FetchError> {
        self.tab
            .set_user_agent(user_agent, None, None)
            .map_err(|e| FetchError::SessionStart(e.to_string()))
    }

    fn navigate(&mut self, url: &str) -> Result<(), FetchError> {
        self.url = url.to_string();
        self.tab
            .navigate_to(url)
            .map(|_| ())
            .map_err(|e| FetchError::Navigation(e.to_string()))
    }

    fn wait_for_navigation(&mut self, timeout: Duration) -> Result<(), FetchError> {
        self.tab
            .set_default_timeout(timeout)
            .wait_until_navigated()
            .map(|_| ())
            .map_err(|e| {
                debug!(error = %e, "navigation did not settle");
                FetchError::Timeout {
                    url: self.url.clone(),
                    timeout,
                }
            })
    }

    fn wait_for_body(&mut self, timeout: Duration) -> Result<(), FetchError> {
        self.tab
            .wait_for_element_with_custom_timeout("body", timeout)
            .map(|_| ())
            .map_err(|e| {
                debug!(error = %e, "body did not appear");
                FetchError::Timeout {
                    url: self.url.clone(),
                    timeout,
                }
            })
    }

    fn content(&mut self) -> Result<String, FetchError> {
        self.tab
            .get_content()
            .map_err(|e| FetchError::Content(e.to_string()))
    }

    fn close(&mut self) {
        if let Some(browser) = self.browser.take() {
            if let Err(e) = self.tab.close(false) {
                debug!(error = %e, "tab close failed");
            }
            // Dropping the handle kills the browser process.
            drop(browser);
        }
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.close();
    }
}
