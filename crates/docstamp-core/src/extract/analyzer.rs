//! Whole-document analysis combining the field extractors.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::models::{DocstampConfig, DocumentMetadata};

use super::naming::suggested_name;
use super::rules::{
    detect_seal, AmountExtractor, DateExtractor, DocumentTypeClassifier, EntityExtractor,
    NormalizedDate, PartyRole,
};
use super::DocumentExtractor;

/// Extracts every metadata field from document text.
///
/// The reference date used for validating and defaulting dates is the local
/// current date unless pinned with [`DocumentAnalyzer::with_today`].
#[derive(Debug, Clone, Default)]
pub struct DocumentAnalyzer {
    config: DocstampConfig,
    today: Option<NaiveDate>,
}

impl DocumentAnalyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with the given settings.
    pub fn with_config(config: DocstampConfig) -> Self {
        Self {
            config,
            today: None,
        }
    }

    /// Pin the reference date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &DocstampConfig {
        &self.config
    }

    /// The reference date in effect.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn normalized_date(&self, text: &str, today: NaiveDate) -> NormalizedDate {
        DateExtractor::new(today, &self.config.dates).extract_normalized(text)
    }

    /// Document date as `YYMMDD`; today when nothing plausible is found.
    pub fn extract_date(&self, text: &str) -> String {
        self.normalized_date(text, self.today()).into_string()
    }

    /// Issuing party (`is_subject`) or receiving party name.
    pub fn extract_entity(&self, text: &str, is_subject: bool) -> String {
        let role = PartyRole::from_is_subject(is_subject);
        EntityExtractor::new(role, self.config.entities.clone()).extract_name(text)
    }

    pub fn extract_document_type(&self, text: &str) -> String {
        DocumentTypeClassifier::new(self.config.document_type.clone()).label(text)
    }

    /// Comma-grouped amount, or `None` when no plausible amount is present.
    pub fn extract_amount(&self, text: &str) -> Option<String> {
        AmountExtractor::new(self.config.amounts.clone()).extract_formatted(text)
    }

    pub fn detect_seal(&self, text: &str) -> bool {
        detect_seal(text)
    }

    /// Naming token (`YYMMDD_`) derived from the document date.
    pub fn build_suggested_name(&self, text: &str) -> String {
        suggested_name(&self.normalized_date(text, self.today()))
    }
}

impl DocumentExtractor for DocumentAnalyzer {
    fn analyze(&self, text: &str) -> DocumentMetadata {
        let start = Instant::now();
        let today = self.today();
        let date = self.normalized_date(text, today);

        let metadata = DocumentMetadata {
            suggested_name: suggested_name(&date),
            date: date.into_string(),
            document_type: self.extract_document_type(text),
            subject: self.extract_entity(text, true),
            counterparty: self.extract_entity(text, false),
            amount: self.extract_amount(text),
            has_seal: self.detect_seal(text),
        };

        debug!(?metadata, "extracted metadata");
        info!(
            "Analyzed document ({} chars) in {}ms",
            text.chars().count(),
            start.elapsed().as_millis()
        );

        metadata
    }

    fn suggest_name(&self, text: &str) -> String {
        self.build_suggested_name(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn analyzer() -> DocumentAnalyzer {
        DocumentAnalyzer::new().with_today(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    #[test]
    fn test_analyze_invoice() {
        let text = "請求書\n\
                    株式会社サンプル 御中\n\
                    発行日: 2025年3月10日\n\
                    発行者: テスト商事株式会社\n\
                    合計 ¥1,234,567 (税込)\n\
                    代表取締役 印";

        let metadata = analyzer().analyze(text);

        assert_eq!(metadata.date, "250310");
        assert_eq!(metadata.document_type, "請求書");
        assert_eq!(metadata.amount.as_deref(), Some("1,234,567"));
        assert!(metadata.has_seal);
        assert_eq!(metadata.suggested_name, "250310_");
    }

    #[test]
    fn test_analyze_empty_text() {
        let metadata = analyzer().analyze("");

        assert_eq!(metadata.date, "250615");
        assert_eq!(metadata.document_type, "文書");
        assert_eq!(metadata.subject, "不明");
        assert_eq!(metadata.counterparty, "不明");
        assert_eq!(metadata.amount, None);
        assert!(!metadata.has_seal);
        assert_eq!(metadata.suggested_name, "250615_");
    }

    #[test]
    fn test_suggest_name_matches_date() {
        let analyzer = analyzer();
        let text = "Date: 2024-12-01";

        assert_eq!(analyzer.extract_date(text), "241201");
        assert_eq!(analyzer.suggest_name(text), "241201_");
        assert_eq!(analyzer.build_suggested_name(text), "241201_");
    }

    #[test]
    fn test_configured_labels() {
        let mut config = DocstampConfig::default();
        config.entities.unknown_label = "unknown".to_string();
        config.document_type.fallback_label = "document".to_string();

        let analyzer = DocumentAnalyzer::with_config(config);

        assert_eq!(analyzer.extract_entity("", true), "unknown");
        assert_eq!(analyzer.extract_document_type("ご案内"), "document");
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let analyzer = analyzer();
        let text = "見積書 Quote\n合計 500,000円\n発行者: Example Corp.";

        assert_eq!(analyzer.analyze(text), analyzer.analyze(text));
    }
}
