pub mod export;
pub mod import;
pub mod markup;

// Re-export main functions for convenience
pub use export::{default_file_name, export_collection, HtmlExporter};
pub use import::{parse_bookmark_file, parse_bookmark_groups, BookmarkParser, NestingMode};
