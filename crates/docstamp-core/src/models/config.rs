//! Configuration structures for the extraction engine.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DocstampError, Result};

/// Main configuration for the docstamp engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocstampConfig {
    /// Date extraction configuration.
    pub dates: DateConfig,

    /// Counter-party extraction configuration.
    pub entities: EntityConfig,

    /// Amount extraction configuration.
    pub amounts: AmountConfig,

    /// Document type classification configuration.
    pub document_type: DocumentTypeConfig,
}

/// Date extraction and plausibility configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// Characters taken on each side of a date keyword.
    pub keyword_radius: usize,

    /// Dates later than today plus this many days are rejected.
    pub future_days: i64,

    /// Dates earlier than today minus this many years are rejected.
    pub past_years: i32,

    /// Earliest western year accepted from a pattern match.
    pub min_year: i32,

    /// Latest western year accepted from a pattern match.
    pub max_year: i32,

    /// Two-digit years above this value map to the 1900s, others to the 2000s.
    pub two_digit_pivot: i32,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            keyword_radius: 50,
            future_days: 90,
            past_years: 20,
            min_year: 1900,
            max_year: 2100,
            two_digit_pivot: 50,
        }
    }
}

/// Counter-party name extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    /// Characters following a keyword that are searched for names.
    pub window: usize,

    /// Score given to candidates found near a keyword.
    pub keyword_bonus: i32,

    /// Score given to candidates found by the whole-text scan.
    pub fallback_bonus: i32,

    /// Added when the name carries a legal-entity marker.
    pub corporate_bonus: i32,

    /// Subtracted when the name looks like a postal address.
    pub address_penalty: i32,

    /// Returned when no candidate scores above zero.
    pub unknown_label: String,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            window: 200,
            keyword_bonus: 2,
            fallback_bonus: 1,
            corporate_bonus: 2,
            address_penalty: 1,
            unknown_label: "不明".to_string(),
        }
    }
}

/// Monetary amount extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmountConfig {
    /// Characters from the start of an amount keyword that are searched.
    pub window: usize,

    /// Characters on each side of a match checked for a tax-included marker.
    pub tax_context_radius: usize,

    /// Added when a tax-included marker is near the match.
    pub tax_included_bonus: f32,

    /// Values below this are considered less plausible as totals.
    pub small_amount_threshold: u64,

    /// Subtracted from values below `small_amount_threshold`.
    pub small_amount_penalty: f32,

    /// Winning values below this are discarded.
    pub min_amount: u64,
}

impl Default for AmountConfig {
    fn default() -> Self {
        Self {
            window: 200,
            tax_context_radius: 20,
            tax_included_bonus: 2.0,
            small_amount_threshold: 100_000,
            small_amount_penalty: 0.5,
            min_amount: 100,
        }
    }
}

/// Document type classification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTypeConfig {
    /// Only this many leading characters are classified.
    pub scan_limit: usize,

    /// Label returned when no type keyword occurs.
    pub fallback_label: String,
}

impl Default for DocumentTypeConfig {
    fn default() -> Self {
        Self {
            scan_limit: 2000,
            fallback_label: "文書".to_string(),
        }
    }
}

impl DocstampConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings that would make an extractor meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.dates.keyword_radius == 0 {
            return Err(DocstampError::Config("dates.keyword_radius must be positive".into()));
        }
        if self.dates.past_years < 0 || self.dates.future_days < 0 {
            return Err(DocstampError::Config(
                "dates.past_years and dates.future_days must not be negative".into(),
            ));
        }
        if self.dates.min_year > self.dates.max_year {
            return Err(DocstampError::Config(format!(
                "dates.min_year ({}) is after dates.max_year ({})",
                self.dates.min_year, self.dates.max_year
            )));
        }
        if !(0..100).contains(&self.dates.two_digit_pivot) {
            return Err(DocstampError::Config("dates.two_digit_pivot must be in 0..100".into()));
        }
        if self.entities.window == 0 || self.amounts.window == 0 {
            return Err(DocstampError::Config("keyword windows must be positive".into()));
        }
        if self.document_type.scan_limit == 0 {
            return Err(DocstampError::Config("document_type.scan_limit must be positive".into()));
        }
        Ok(())
    }
}
