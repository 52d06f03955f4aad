//! Turns a rendered HTML document into on-page SEO findings.
//!
//! Each signal is produced by its own [`SeoPlugin`]; [`SignalExtractor`]
//! runs them all over a single parsed [`Page`].

mod extractor;
pub mod plugins;
pub mod utils;

pub use extractor::{PageSignals, SignalExtractor, extract};
pub use utils::finding::{FindingStatus, HeadingFinding, ImageFinding, LengthRange, TagFinding};
pub use utils::page::Page;
pub use utils::page_plugin::SeoPlugin;
