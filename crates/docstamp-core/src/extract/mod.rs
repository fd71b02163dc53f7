//! Document metadata extraction.

mod analyzer;
pub mod naming;
pub mod rules;

pub use analyzer::DocumentAnalyzer;
pub use naming::{final_file_name, suggested_name, unique_file_name};

use chrono::NaiveDate;

use crate::models::DocumentMetadata;

/// Trait for whole-document metadata extractors.
pub trait DocumentExtractor {
    /// Extract every metadata field from document text.
    fn analyze(&self, text: &str) -> DocumentMetadata;

    /// The naming token (`YYMMDD_`) for a document.
    fn suggest_name(&self, text: &str) -> String;
}

/// Document date as `YYMMDD`, defaulting to the local current date.
pub fn extract_date(text: &str) -> String {
    DocumentAnalyzer::new().extract_date(text)
}

/// Document date as `YYMMDD` relative to a fixed reference date.
pub fn extract_date_at(text: &str, today: NaiveDate) -> String {
    DocumentAnalyzer::new().with_today(today).extract_date(text)
}

/// Issuing (`is_subject`) or receiving party name, or 不明.
pub fn extract_entity(text: &str, is_subject: bool) -> String {
    DocumentAnalyzer::new().extract_entity(text, is_subject)
}

/// Document type label, or 文書.
pub fn extract_document_type(text: &str) -> String {
    DocumentAnalyzer::new().extract_document_type(text)
}

/// Comma-grouped amount, if any.
pub fn extract_amount(text: &str) -> Option<String> {
    DocumentAnalyzer::new().extract_amount(text)
}

pub fn detect_seal(text: &str) -> bool {
    rules::detect_seal(text)
}

/// Naming token (`YYMMDD_`) for a document.
pub fn build_suggested_name(text: &str) -> String {
    DocumentAnalyzer::new().build_suggested_name(text)
}

pub fn build_suggested_name_at(text: &str, today: NaiveDate) -> String {
    DocumentAnalyzer::new().with_today(today).build_suggested_name(text)
}

/// Full metadata with default settings.
pub fn analyze(text: &str) -> DocumentMetadata {
    DocumentAnalyzer::new().analyze(text)
}

/// Full metadata relative to a fixed reference date.
pub fn analyze_at(text: &str, today: NaiveDate) -> DocumentMetadata {
    DocumentAnalyzer::new().with_today(today).analyze(text)
}
