use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("title"));
static META_DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| selector(r#"meta[name="description"]"#));
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("body"));
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("img"));
static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("h1"));

fn selector(css: &str) -> Selector {
    #[allow(clippy::expect_used)]
    Selector::parse(css).expect("static selector must parse")
}

/// A rendered document, parsed once and shared by every plugin.
pub struct Page {
    document: Html,
}

impl Page {
    /// Parsing is best effort: malformed markup still yields a document.
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn get_document(&self) -> &Html {
        &self.document
    }

    pub fn extract_meta_tags(&self) -> MetaTagInfo {
        let title = self
            .document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>());

        // Only the first description tag counts, even when it has no content.
        let description = self
            .document
            .select(&META_DESCRIPTION_SELECTOR)
            .next()
            .map(|el| el.value().attr("content").unwrap_or_default().to_string());

        MetaTagInfo { title, description }
    }

    /// Trimmed text of every `h1`, in document order.
    pub fn extract_h1(&self) -> Vec<String> {
        self.document
            .select(&H1_SELECTOR)
            .map(|heading| heading.text().collect::<String>().trim().to_string())
            .collect()
    }

    pub fn extract_images(&self) -> Vec<Image> {
        self.document
            .select(&IMG_SELECTOR)
            .map(|img| Image {
                src: img.value().attr("src").unwrap_or_default().to_string(),
                alt: img.value().attr("alt").map(|s| s.to_string()),
            })
            .collect()
    }

    pub fn body(&self) -> Option<ElementRef<'_>> {
        self.document.select(&BODY_SELECTOR).next()
    }

    /// Whitespace-separated tokens of all text under `body`.
    pub fn body_word_count(&self) -> usize {
        self.body()
            .map(|body| {
                body.text()
                    .map(|chunk| chunk.split_whitespace().count())
                    .sum()
            })
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTagInfo {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
}
