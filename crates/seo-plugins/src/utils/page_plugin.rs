use super::page::Page;

// Main plugin trait
pub trait SeoPlugin: Send + Sync + 'static {
    type Finding;

    fn name(&self) -> &str;
    fn description(&self) -> &str;

    // Inspect the page and report what was found
    fn analyze(&self, page: &Page) -> Self::Finding;
}
