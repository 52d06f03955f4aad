pub mod content;
pub mod heading;
pub mod image;
pub mod meta_description;
pub mod title;
