//! Data models for document metadata extraction.

pub mod config;
pub mod metadata;

pub use config::DocstampConfig;
pub use metadata::DocumentMetadata;
