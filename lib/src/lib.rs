pub mod browser;
pub mod config;
pub mod error;
pub mod import_export;
pub mod models;
pub mod query;
pub mod store;
pub mod tabs;
pub mod utils;

// Re-export error types for convenience
pub use error::DogearError;
