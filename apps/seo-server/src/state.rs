use std::sync::Arc;

use seo_analyzer::Auditor;
use seo_storage::SeoStorage;

#[derive(Clone)]
pub struct AppState {
    pub auditor: Arc<Auditor>,
    /// `None` when the cache database is disabled or could not be opened.
    pub cache: Option<SeoStorage>,
}

impl AppState {
    pub fn new(auditor: Arc<Auditor>, cache: Option<SeoStorage>) -> Self {
        Self { auditor, cache }
    }
}
