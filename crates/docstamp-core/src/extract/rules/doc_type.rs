//! Document type classification by keyword priority.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::config::DocumentTypeConfig;

use super::normalize::char_prefix;

/// Canonical document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Receipt,
    Estimate,
    DeliveryNote,
    PurchaseOrder,
    Contract,
    Memorandum,
    Minutes,
    TransferStatement,
    Statement,
    Acknowledgment,
}

impl DocumentKind {
    /// Label used in file names.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "請求書",
            DocumentKind::Receipt => "領収書",
            DocumentKind::Estimate => "見積書",
            DocumentKind::DeliveryNote => "納品書",
            DocumentKind::PurchaseOrder => "発注書",
            DocumentKind::Contract => "契約書",
            DocumentKind::Memorandum => "覚書",
            DocumentKind::Minutes => "議事録",
            DocumentKind::TransferStatement => "振込明細",
            DocumentKind::Statement => "明細書",
            DocumentKind::Acknowledgment => "請書",
        }
    }
}

/// Engagement qualifiers placed in front of the type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// 委任 (mandate).
    Mandate,
    /// 弁護士報酬 (attorney retainer).
    Retainer,
    /// 業務委託 (outsourcing).
    Outsourcing,
    /// 秘密保持 (non-disclosure).
    NonDisclosure,
}

impl Modifier {
    pub fn label(&self) -> &'static str {
        match self {
            Modifier::Mandate => "委任",
            Modifier::Retainer => "弁護士報酬",
            Modifier::Outsourcing => "業務委託",
            Modifier::NonDisclosure => "秘密保持",
        }
    }
}

/// Modifiers in scan order.
const MODIFIERS: [Modifier; 4] = [
    Modifier::Mandate,
    Modifier::Retainer,
    Modifier::Outsourcing,
    Modifier::NonDisclosure,
];

/// Type keywords in priority order: Japanese terms, then English synonyms.
/// Keys are lower-case; the text is lower-cased before matching.
const TYPE_KEYWORDS: [(&str, DocumentKind); 17] = [
    ("請求書", DocumentKind::Invoice),
    ("領収書", DocumentKind::Receipt),
    ("見積書", DocumentKind::Estimate),
    ("納品書", DocumentKind::DeliveryNote),
    ("発注書", DocumentKind::PurchaseOrder),
    ("契約書", DocumentKind::Contract),
    ("覚書", DocumentKind::Memorandum),
    ("議事録", DocumentKind::Minutes),
    ("振込明細", DocumentKind::TransferStatement),
    ("明細書", DocumentKind::Statement),
    ("請書", DocumentKind::Acknowledgment),
    ("invoice", DocumentKind::Invoice),
    ("receipt", DocumentKind::Receipt),
    ("estimate", DocumentKind::Estimate),
    ("quote", DocumentKind::Estimate),
    ("contract", DocumentKind::Contract),
    ("statement", DocumentKind::Statement),
];

/// Result of classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentType {
    pub modifier: Option<Modifier>,
    pub kind: Option<DocumentKind>,
}

impl DocumentType {
    /// Label with its modifier, or `fallback` when no type was recognized.
    pub fn label_or(&self, fallback: &str) -> String {
        match (self.kind, self.modifier) {
            (Some(kind), Some(modifier)) => format!("{}{}", modifier.label(), kind.label()),
            (Some(kind), None) => kind.label().to_string(),
            (None, _) => fallback.to_string(),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label_or(&DocumentTypeConfig::default().fallback_label))
    }
}

/// Classifies documents from their leading text.
#[derive(Debug, Clone, Default)]
pub struct DocumentTypeClassifier {
    config: DocumentTypeConfig,
}

impl DocumentTypeClassifier {
    pub fn new(config: DocumentTypeConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, text: &str) -> DocumentType {
        let head = char_prefix(text, self.config.scan_limit);

        let modifier = MODIFIERS.into_iter().find(|m| head.contains(m.label()));

        let lowered = head.to_lowercase();
        let kind = TYPE_KEYWORDS
            .iter()
            .find(|(key, _)| lowered.contains(*key))
            .map(|&(_, kind)| kind);

        debug!(?kind, ?modifier, "document classified");
        DocumentType { modifier, kind }
    }

    /// The file-name label for `text`.
    pub fn label(&self, text: &str) -> String {
        self.classify(text).label_or(&self.config.fallback_label)
    }
}

/// Classify with default settings.
pub fn classify_document(text: &str) -> DocumentType {
    DocumentTypeClassifier::default().classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn label(text: &str) -> String {
        DocumentTypeClassifier::default().label(text)
    }

    #[test]
    fn test_japanese_types() {
        assert_eq!(label("請求書\n株式会社サンプル 御中"), "請求書");
        assert_eq!(label("領収書 No.12"), "領収書");
        assert_eq!(label("第3回 定例会議 議事録"), "議事録");
    }

    #[test]
    fn test_mapping_order_not_text_order() {
        assert_eq!(label("領収書 (請求書番号 123 に対する)"), "請求書");
        assert_eq!(label("振込明細書"), "振込明細");
    }

    #[test]
    fn test_english_synonyms_case_insensitive() {
        assert_eq!(label("INVOICE #2024-001"), "請求書");
        assert_eq!(label("Quote for consulting services"), "見積書");
        assert_eq!(label("Monthly Statement"), "明細書");
    }

    #[test]
    fn test_modifier_prefix() {
        assert_eq!(label("業務委託契約書"), "業務委託契約書");
        assert_eq!(label("秘密保持に関する覚書"), "秘密保持覚書");
        assert_eq!(label("委任契約 弁護士報酬 契約書"), "委任契約書");
    }

    #[test]
    fn test_fallback_label() {
        assert_eq!(label("ご案内"), "文書");
        assert_eq!(label("業務委託のご案内"), "文書");
        assert_eq!(label(""), "文書");
    }

    #[test]
    fn test_only_leading_text_is_classified() {
        let text = format!("{}請求書", "あ".repeat(2000));
        assert_eq!(label(&text), "文書");

        let text = format!("{}請求書", "あ".repeat(1997));
        assert_eq!(label(&text), "請求書");
    }

    #[test]
    fn test_classify_structure() {
        let doc = classify_document("業務委託 invoice");
        assert_eq!(doc.kind, Some(DocumentKind::Invoice));
        assert_eq!(doc.modifier, Some(Modifier::Outsourcing));
        assert_eq!(doc.to_string(), "業務委託請求書");
    }
}
