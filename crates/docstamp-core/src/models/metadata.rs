//! Metadata extracted from a single document.

use serde::{Deserialize, Serialize};

/// Everything the engine derives from one document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Transaction date as `YYMMDD`.
    pub date: String,

    /// Document type label, e.g. 請求書 or 業務委託契約書.
    pub document_type: String,

    /// Issuing party, or the unknown label.
    pub subject: String,

    /// Receiving party, or the unknown label.
    pub counterparty: String,

    /// Comma-grouped amount, if a plausible one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// Whether a seal or signature is mentioned.
    pub has_seal: bool,

    /// Naming token for the file (`YYMMDD_`).
    pub suggested_name: String,
}
