use crate::utils::{
    finding::{LengthRange, TagFinding},
    page::Page,
    page_plugin::SeoPlugin,
};

pub const TITLE_LENGTH: LengthRange = LengthRange::new(50, 60);

// Title Plugin
pub struct TitlePlugin {
    range: LengthRange,
}

impl Default for TitlePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl TitlePlugin {
    pub fn new() -> Self {
        Self {
            range: TITLE_LENGTH,
        }
    }

    pub fn with_range(range: LengthRange) -> Self {
        Self { range }
    }
}

impl SeoPlugin for TitlePlugin {
    type Finding = TagFinding;

    fn name(&self) -> &str {
        "Title"
    }
    fn description(&self) -> &str {
        "The title tag of a web page is meant to be an accurate and concise description of
 a page's content. It is critical to both user experience and SEO."
    }

    fn analyze(&self, page: &Page) -> TagFinding {
        let title = page.extract_meta_tags().title.unwrap_or_default();
        TagFinding::measure(title, self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::finding::FindingStatus;

    fn page_with_title(length: usize) -> Page {
        let title = "t".repeat(length);
        Page::from_html(&format!(
            "<html><head><title>{title}</title></head><body></body></html>"
        ))
    }

    #[test]
    fn test_title_status_for_every_length() {
        let plugin = TitlePlugin::new();
        for length in 0..=80 {
            let finding = plugin.analyze(&page_with_title(length));
            let expected = match length {
                0 => FindingStatus::Error,
                50..=60 => FindingStatus::Good,
                _ => FindingStatus::Warning,
            };
            assert_eq!(finding.length as usize, length);
            assert_eq!(finding.status, expected, "title length {}", length);
        }
    }

    #[test]
    fn test_missing_title() {
        let plugin = TitlePlugin::new();
        let finding = plugin.analyze(&Page::from_html("<html><body></body></html>"));
        assert_eq!(finding.text, "");
        assert_eq!(finding.length, 0);
        assert_eq!(finding.status, FindingStatus::Error);
    }

    #[test]
    fn test_first_title_wins() {
        let html = "<html><head><title>First</title><title>Second</title></head></html>";
        let finding = TitlePlugin::new().analyze(&Page::from_html(html));
        assert_eq!(finding.text, "First");
    }
}
