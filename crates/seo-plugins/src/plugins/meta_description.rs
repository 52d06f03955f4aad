use crate::utils::{
    finding::{LengthRange, TagFinding},
    page::Page,
    page_plugin::SeoPlugin,
};

pub const META_DESCRIPTION_LENGTH: LengthRange = LengthRange::new(150, 160);

// MetaDescription Plugin
pub struct MetaDescriptionPlugin {
    range: LengthRange,
}

impl Default for MetaDescriptionPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl MetaDescriptionPlugin {
    pub fn new() -> Self {
        Self {
            range: META_DESCRIPTION_LENGTH,
        }
    }

    pub fn with_range(range: LengthRange) -> Self {
        Self { range }
    }
}

const PLUGIN_NAME: &str = "MetaDescription";

impl SeoPlugin for MetaDescriptionPlugin {
    type Finding = TagFinding;

    fn name(&self) -> &str {
        PLUGIN_NAME
    }
    fn description(&self) -> &str {
        "Meta descriptions provide concise explanations of the contents of web pages. They are commonly used on search engine result pages to display preview snippets for a given page."
    }

    fn analyze(&self, page: &Page) -> TagFinding {
        let description = page.extract_meta_tags().description.unwrap_or_default();
        TagFinding::measure(description, self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::finding::FindingStatus;

    #[test]
    fn test_meta_description_status_for_every_length() {
        let plugin = MetaDescriptionPlugin::new();
        for length in 0..=200 {
            let html = format!(
                r#"<html><head><meta name="description" content="{}"></head></html>"#,
                "d".repeat(length)
            );
            let finding = plugin.analyze(&Page::from_html(&html));
            let expected = match length {
                0 => FindingStatus::Error,
                150..=160 => FindingStatus::Good,
                _ => FindingStatus::Warning,
            };
            assert_eq!(finding.status, expected, "description length {}", length);
        }
    }

    #[test]
    fn test_missing_meta_description() {
        let finding = MetaDescriptionPlugin::new().analyze(&Page::from_html("<html></html>"));
        assert_eq!(finding.text, "");
        assert_eq!(finding.status, FindingStatus::Error);
    }

    #[test]
    fn test_other_meta_tags_are_ignored() {
        let html = r#"
            <html>
                <head>
                    <meta name="keywords" content="rust, seo">
                    <meta property="og:description" content="Open graph text">
                </head>
            </html>
        "#;
        let finding = MetaDescriptionPlugin::new().analyze(&Page::from_html(html));
        assert_eq!(finding.length, 0);
    }
}
