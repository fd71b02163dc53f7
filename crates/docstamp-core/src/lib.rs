//! Core library for Japanese business-document metadata extraction.
//!
//! This crate provides:
//! - Date extraction with Japanese era conversion and plausibility checks
//! - Issuer and recipient name extraction by keyword proximity
//! - Document type classification and amount extraction
//! - File-name suggestions derived from the extracted date

pub mod error;
pub mod models;
pub mod extract;

pub use error::{DocstampError, ExtractionError, Result};
pub use models::{DocstampConfig, DocumentMetadata};
pub use extract::{
    analyze, analyze_at, build_suggested_name, build_suggested_name_at, detect_seal,
    extract_amount, extract_date, extract_date_at, extract_document_type, extract_entity,
    final_file_name, unique_file_name, DocumentAnalyzer, DocumentExtractor,
};
