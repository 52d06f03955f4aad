use crate::utils::{
    finding::HeadingFinding,
    page::Page,
    page_plugin::SeoPlugin,
};

// H1 Plugin
#[derive(Default)]
pub struct HeadingPlugin {}

impl HeadingPlugin {
    pub fn new() -> Self {
        Self {}
    }
}

impl SeoPlugin for HeadingPlugin {
    type Finding = HeadingFinding;

    fn name(&self) -> &str {
        "H1"
    }
    fn description(&self) -> &str {
        "A page should have exactly one top-level heading describing its main topic."
    }

    fn analyze(&self, page: &Page) -> HeadingFinding {
        HeadingFinding::from_tags(page.extract_h1())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::finding::FindingStatus;

    #[test]
    fn test_heading_status_by_count() {
        let plugin = HeadingPlugin::new();
        for count in 0..5 {
            let headings = (0..count)
                .map(|i| format!("<h1>Heading {i}</h1>"))
                .collect::<String>();
            let html = format!("<html><body>{headings}</body></html>");
            let finding = plugin.analyze(&Page::from_html(&html));

            assert_eq!(finding.count, count);
            assert_eq!(finding.tags.len() as u32, count);
            let expected = if count == 1 {
                FindingStatus::Good
            } else {
                FindingStatus::Error
            };
            assert_eq!(finding.status, expected);
        }
    }

    #[test]
    fn test_heading_tags_keep_document_order() {
        let html = "<body><h1>First</h1><section><h1> Second </h1></section></body>";
        let finding = HeadingPlugin::new().analyze(&Page::from_html(html));
        assert_eq!(finding.tags, vec!["First", "Second"]);
    }
}
