use crate::utils::{finding::ImageFinding, page::Page, page_plugin::SeoPlugin};

// Image Plugin
pub struct ImagePlugin {}

impl Default for ImagePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl ImagePlugin {
    pub fn new() -> Self {
        Self {}
    }
}

impl SeoPlugin for ImagePlugin {
    type Finding = Vec<ImageFinding>;

    fn name(&self) -> &str {
        "Images"
    }
    fn description(&self) -> &str {
        "Image optimization analysis"
    }

    fn analyze(&self, page: &Page) -> Vec<ImageFinding> {
        page.extract_images()
            .into_iter()
            .map(|img| ImageFinding::new(img.src, img.alt.as_deref().unwrap_or_default()))
            .collect()
    }
}
