pub mod finding;
pub mod page;
pub mod page_plugin;
