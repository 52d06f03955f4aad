use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a single SEO check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingStatus {
    Good,
    Warning,
    Error,
}

impl fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FindingStatus::Good => "good",
            FindingStatus::Warning => "warning",
            FindingStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// Inclusive character-length window a tag's text should fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRange {
    pub min: u32,
    pub max: u32,
}

impl LengthRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, length: u32) -> bool {
        (self.min..=self.max).contains(&length)
    }

    /// Empty is an error, in range is good, anything else is a warning.
    pub fn status(&self, length: u32) -> FindingStatus {
        if length == 0 {
            FindingStatus::Error
        } else if self.contains(length) {
            FindingStatus::Good
        } else {
            FindingStatus::Warning
        }
    }
}

impl fmt::Display for LengthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFinding {
    pub text: String,
    pub length: u32,
    pub status: FindingStatus,
}

impl TagFinding {
    pub fn measure(text: String, range: LengthRange) -> Self {
        let length = char_length(&text);
        Self {
            status: range.status(length),
            text,
            length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingFinding {
    pub tags: Vec<String>,
    pub count: u32,
    pub status: FindingStatus,
}

impl HeadingFinding {
    pub fn from_tags(tags: Vec<String>) -> Self {
        let count = u32::try_from(tags.len()).unwrap_or(u32::MAX);
        let status = if count == 1 {
            FindingStatus::Good
        } else {
            FindingStatus::Error
        };
        Self {
            tags,
            count,
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFinding {
    pub src: String,
    pub alt: String,
    pub status: FindingStatus,
}

impl ImageFinding {
    pub fn new(src: impl Into<String>, alt: &str) -> Self {
        let alt = alt.trim().to_string();
        let status = if alt.is_empty() {
            FindingStatus::Error
        } else {
            FindingStatus::Good
        };
        Self {
            src: src.into(),
            alt,
            status,
        }
    }

    pub fn is_missing_alt(&self) -> bool {
        self.alt.is_empty()
    }
}

fn char_length(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}
