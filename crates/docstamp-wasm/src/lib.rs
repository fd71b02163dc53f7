//! WASM bindings for business document metadata extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use docstamp_core::{DocstampConfig, DocumentAnalyzer, DocumentExtractor};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_today(today: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(today, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("invalid date '{}': {}", today, e)))
}

/// Document date as `YYMMDD`; today when no plausible date is present.
#[wasm_bindgen]
pub fn extract_date(text: &str) -> String {
    docstamp_core::extract_date(text)
}

/// Document date relative to a fixed reference date (`YYYY-MM-DD`).
#[wasm_bindgen]
pub fn extract_date_at(text: &str, today: &str) -> Result<String, JsValue> {
    Ok(docstamp_core::extract_date_at(text, parse_today(today)?))
}

/// Issuer (`is_subject`) or recipient name, or 不明.
#[wasm_bindgen]
pub fn extract_entity(text: &str, is_subject: bool) -> String {
    docstamp_core::extract_entity(text, is_subject)
}

#[wasm_bindgen]
pub fn extract_document_type(text: &str) -> String {
    docstamp_core::extract_document_type(text)
}

/// Comma-grouped amount, or `undefined`.
#[wasm_bindgen]
pub fn extract_amount(text: &str) -> Option<String> {
    docstamp_core::extract_amount(text)
}

#[wasm_bindgen]
pub fn detect_seal(text: &str) -> bool {
    docstamp_core::detect_seal(text)
}

/// Naming token (`YYMMDD_`) for a document.
#[wasm_bindgen]
pub fn build_suggested_name(text: &str) -> String {
    docstamp_core::build_suggested_name(text)
}

/// File name for a renamed upload, keeping its lower-cased extension.
#[wasm_bindgen]
pub fn final_file_name(custom_name: &str, original_file_name: &str) -> String {
    docstamp_core::final_file_name(custom_name, original_file_name)
}

/// All metadata fields as a plain object.
#[wasm_bindgen]
pub fn analyze(text: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&docstamp_core::analyze(text))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Configured analyzer for browser use.
#[wasm_bindgen]
pub struct DocumentAnalyzerJs {
    analyzer: DocumentAnalyzer,
}

#[wasm_bindgen]
impl DocumentAnalyzerJs {
    /// Create an analyzer with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            analyzer: DocumentAnalyzer::new(),
        }
    }

    /// Create an analyzer from a JSON configuration string.
    #[wasm_bindgen]
    pub fn from_config_json(json: &str) -> Result<DocumentAnalyzerJs, JsValue> {
        let config: DocstampConfig =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            analyzer: DocumentAnalyzer::with_config(config),
        })
    }

    /// Pin the reference date (`YYYY-MM-DD`).
    #[wasm_bindgen]
    pub fn set_today(&mut self, today: &str) -> Result<(), JsValue> {
        let today = parse_today(today)?;
        self.analyzer = self.analyzer.clone().with_today(today);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn analyze(&self, text: &str) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.analyzer.analyze(text))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn suggest_name(&self, text: &str) -> String {
        self.analyzer.suggest_name(text)
    }

    #[wasm_bindgen]
    pub fn extract_date(&self, text: &str) -> String {
        self.analyzer.extract_date(text)
    }

    #[wasm_bindgen]
    pub fn extract_entity(&self, text: &str, is_subject: bool) -> String {
        self.analyzer.extract_entity(text, is_subject)
    }

    #[wasm_bindgen]
    pub fn extract_amount(&self, text: &str) -> Option<String> {
        self.analyzer.extract_amount(text)
    }
}

impl Default for DocumentAnalyzerJs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_extract_date_at() {
        assert_eq!(extract_date_at("令和5年4月1日", "2025-06-15").unwrap(), "230401");
    }

    #[wasm_bindgen_test]
    fn test_extract_fields() {
        assert_eq!(extract_entity("発行元: Example Corp.", true), "Example");
        assert_eq!(extract_document_type("見積書"), "見積書");
        assert_eq!(extract_amount("合計 ¥1,234,567 (税込)"), Some("1,234,567".to_string()));
        assert!(detect_seal("押印"));
    }

    #[wasm_bindgen_test]
    fn test_final_file_name() {
        assert_eq!(final_file_name("230401_", "scan.PDF"), "230401_.pdf");
    }

    #[wasm_bindgen_test]
    fn test_analyzer_with_pinned_date() {
        let mut analyzer = DocumentAnalyzerJs::new();
        analyzer.set_today("2025-06-15").unwrap();

        assert_eq!(analyzer.suggest_name("本文のみ"), "250615_");
        assert_eq!(analyzer.extract_date("発行日 2025/03/10"), "250310");
    }

    #[wasm_bindgen_test]
    fn test_from_config_json() {
        let analyzer =
            DocumentAnalyzerJs::from_config_json(r#"{"entities": {"unknown_label": "unknown"}}"#)
                .unwrap();
        assert_eq!(analyzer.extract_entity("", true), "unknown");
    }
}
