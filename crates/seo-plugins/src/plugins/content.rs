use crate::utils::{page::Page, page_plugin::SeoPlugin};

// Word count Plugin
#[derive(Default)]
pub struct WordCountPlugin {}

impl WordCountPlugin {
    pub fn new() -> Self {
        Self {}
    }
}

impl SeoPlugin for WordCountPlugin {
    type Finding = u32;

    fn name(&self) -> &str {
        "Word Count"
    }
    fn description(&self) -> &str {
        "Counts the words rendered in the page body. Thin pages rarely rank."
    }

    fn analyze(&self, page: &Page) -> u32 {
        u32::try_from(page.body_word_count()).unwrap_or(u32::MAX)
    }
}
