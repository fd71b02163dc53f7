//! Monetary amount extraction for business documents.

use tracing::{debug, trace};

use crate::models::config::AmountConfig;

use super::normalize::char_window;
use super::patterns::{
    AMOUNT_BARE, AMOUNT_KEYWORDS, AMOUNT_YEN_PREFIXED, AMOUNT_YEN_SUFFIXED, TAX_INCLUDED,
};
use super::proximity::{best_near_keywords, ProximityWindow};
use super::{FieldExtractor, ScoredCandidate};

/// Amount field extractor.
///
/// Near a total/amount-due keyword the best-scored candidate wins; without
/// any keyword hit the largest amount anywhere in the text is taken.
#[derive(Debug, Clone, Default)]
pub struct AmountExtractor {
    config: AmountConfig,
}

impl AmountExtractor {
    pub fn new(config: AmountConfig) -> Self {
        Self { config }
    }

    /// Scored amounts in `text`: yen-prefixed first, then yen-suffixed, then
    /// bare numbers.
    fn candidates(&self, text: &str) -> Vec<ScoredCandidate<u64>> {
        let mut results = Vec::new();

        for pattern in [&*AMOUNT_YEN_PREFIXED, &*AMOUNT_YEN_SUFFIXED, &*AMOUNT_BARE] {
            for caps in pattern.captures_iter(text) {
                let Some(value) = parse_amount(&caps[1]) else {
                    continue;
                };
                let full = caps.get(0).unwrap();
                let score = self.score(text, full.start(), value);
                trace!(value, score, "amount candidate");

                results.push(
                    ScoredCandidate::new(value, score, full.as_str())
                        .with_position(full.start(), full.end()),
                );
            }
        }

        results
    }

    fn score(&self, text: &str, start: usize, value: u64) -> f32 {
        let radius = self.config.tax_context_radius;
        let mut score = 1.0;

        if char_window(text, start, start, radius, radius).contains(TAX_INCLUDED) {
            score += self.config.tax_included_bonus;
        }
        if value < self.config.small_amount_threshold {
            score -= self.config.small_amount_penalty;
        }

        score
    }

    /// The formatted amount, or `None` when nothing plausible was found.
    pub fn extract_formatted(&self, text: &str) -> Option<String> {
        let found = self.extract(text)?;
        if found.value < self.config.min_amount {
            debug!(value = found.value, "amount below minimum, discarded");
            return None;
        }
        Some(format_amount(found.value))
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ScoredCandidate<u64>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let window = ProximityWindow::From(self.config.window);
        let near = best_near_keywords(text, &AMOUNT_KEYWORDS, window, |slice, _| {
            self.candidates(slice)
                .into_iter()
                .filter(|c| c.score > 0.0)
                .collect()
        });

        if let Some(found) = near {
            debug!(value = found.value, score = found.score, "amount found near a keyword");
            return Some(found);
        }

        let largest = self
            .candidates(text)
            .into_iter()
            .reduce(|best, c| if c.value > best.value { c } else { best });
        if let Some(found) = &largest {
            debug!(value = found.value, "largest amount in whole text");
        }
        largest
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.candidates(text)
    }
}

/// Integer part of a comma-grouped number; `None` unless positive.
fn parse_amount(digits: &str) -> Option<u64> {
    let integer = digits.split('.').next().unwrap_or_default().replace(',', "");
    integer.parse::<u64>().ok().filter(|&v| v > 0)
}

/// Format with comma thousands separators (1,234,567).
pub fn format_amount(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> Option<String> {
        AmountExtractor::default().extract_formatted(text)
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1_234_567), "1,234,567");
        assert_eq!(format_amount(1_000), "1,000");
        assert_eq!(format_amount(999), "999");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234,567"), Some(1_234_567));
        assert_eq!(parse_amount("1234.56"), Some(1234));
        assert_eq!(parse_amount(","), None);
        assert_eq!(parse_amount("0"), None);
    }

    #[test]
    fn test_tax_included_total() {
        assert_eq!(extract("合計 ¥1,234,567 (税込)"), Some("1,234,567".to_string()));
    }

    #[test]
    fn test_below_minimum() {
        assert_eq!(extract("¥50"), None);
        assert_eq!(extract("合計 ¥50"), None);
    }

    #[test]
    fn test_small_amount_still_returned() {
        assert_eq!(extract("50,000"), Some("50,000".to_string()));
    }

    #[test]
    fn test_tax_marker_beats_larger_value_near_keyword() {
        let text = "合計 ¥88,000 (税込) お振込みは月末までにお願いいたします。\
                    なお、振込手数料は貴社にてご負担ください。口座 1234567";
        assert_eq!(extract(text), Some("88,000".to_string()));
    }

    #[test]
    fn test_fallback_takes_largest_value() {
        let text = "振込手数料 ¥440\n商品代金 ¥12,000";
        assert_eq!(extract(text), Some("12,000".to_string()));
    }

    #[test]
    fn test_candidate_scores() {
        let extractor = AmountExtractor::default();
        let all = extractor.extract_all("¥120,000 (税込)");

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].source, "¥120,000");
        assert_eq!(all[0].score, 3.0);
        assert_eq!(all[1].value, 120_000);
    }

    #[test]
    fn test_no_amount() {
        assert_eq!(extract("請求書"), None);
        assert_eq!(extract(""), None);
    }
}
