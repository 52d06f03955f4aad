use serde::{Deserialize, Serialize};

use crate::plugins::{
    content::WordCountPlugin, heading::HeadingPlugin, image::ImagePlugin,
    meta_description::MetaDescriptionPlugin, title::TitlePlugin,
};
use crate::utils::{
    finding::{HeadingFinding, ImageFinding, TagFinding},
    page::Page,
    page_plugin::SeoPlugin,
};

/// Everything the on-page audit learns from the rendered DOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSignals {
    pub title: TagFinding,
    pub meta_description: TagFinding,
    pub h1: HeadingFinding,
    pub word_count: u32,
    pub images: Vec<ImageFinding>,
}

impl PageSignals {
    pub fn images_missing_alt(&self) -> usize {
        self.images.iter().filter(|img| img.is_missing_alt()).count()
    }
}

/// Runs every page plugin over one document.
#[derive(Default)]
pub struct SignalExtractor {
    title: TitlePlugin,
    meta_description: MetaDescriptionPlugin,
    h1: HeadingPlugin,
    word_count: WordCountPlugin,
    images: ImagePlugin,
}

impl SignalExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, plugin: TitlePlugin) -> Self {
        self.title = plugin;
        self
    }

    pub fn with_meta_description(mut self, plugin: MetaDescriptionPlugin) -> Self {
        self.meta_description = plugin;
        self
    }

    pub fn analyze(&self, page: &Page) -> PageSignals {
        PageSignals {
            title: self.title.analyze(page),
            meta_description: self.meta_description.analyze(page),
            h1: self.h1.analyze(page),
            word_count: self.word_count.analyze(page),
            images: self.images.analyze(page),
        }
    }

    pub fn extract(&self, html: &str) -> PageSignals {
        let page = Page::from_html(html);
        let signals = self.analyze(&page);
        tracing::debug!(
            title_length = signals.title.length,
            h1_count = signals.h1.count,
            word_count = signals.word_count,
            images = signals.images.len(),
            "extracted page signals"
        );
        signals
    }
}

/// Extracts signals with the default target ranges.
pub fn extract(html: &str) -> PageSignals {
    SignalExtractor::default().extract(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::finding::{FindingStatus, LengthRange};

    #[test]
    fn test_extract_well_formed_page() {
        let title = "a".repeat(55);
        let description = "b".repeat(160);
        let html = format!(
            r#"
            <html>
                <head>
                    <title>{title}</title>
                    <meta name="description" content="{description}">
                </head>
                <body>
                    <h1>Main heading</h1>
                    <p>Some body copy here.</p>
                    <img src="/with-alt.png" alt="A described image">
                    <img src="/without-alt.png">
                </body>
            </html>
        "#
        );

        let signals = extract(&html);

        assert_eq!(signals.title.length, 55);
        assert_eq!(signals.title.status, FindingStatus::Good);
        assert_eq!(signals.meta_description.length, 160);
        assert_eq!(signals.meta_description.status, FindingStatus::Good);
        assert_eq!(signals.h1.tags, vec!["Main heading"]);
        assert_eq!(signals.h1.status, FindingStatus::Good);
        assert_eq!(signals.word_count, 6);
        assert_eq!(signals.images.len(), 2);
        assert_eq!(signals.images[0].status, FindingStatus::Good);
        assert_eq!(signals.images[1].status, FindingStatus::Error);
        assert_eq!(signals.images_missing_alt(), 1);
    }

    #[test]
    fn test_extract_empty_document() {
        let signals = extract("");
        assert_eq!(signals.title.status, FindingStatus::Error);
        assert_eq!(signals.meta_description.status, FindingStatus::Error);
        assert_eq!(signals.h1.count, 0);
        assert_eq!(signals.h1.status, FindingStatus::Error);
        assert_eq!(signals.word_count, 0);
        assert!(signals.images.is_empty());
    }

    #[test]
    fn test_custom_ranges() {
        let extractor =
            SignalExtractor::new().with_title(TitlePlugin::with_range(LengthRange::new(1, 5)));
        let signals = extractor.extract("<title>Short</title>");
        assert_eq!(signals.title.status, FindingStatus::Good);
    }

    #[test]
    fn test_signals_serialize_camel_case() {
        let value = serde_json::to_value(extract("<title>x</title>")).unwrap();
        assert!(value.get("metaDescription").is_some());
        assert!(value.get("wordCount").is_some());
        assert_eq!(value["title"]["status"], "warning");
    }
}
