//! Keyword-proximity scoring shared by the date, entity and amount rules.
//!
//! A [`KeywordRule`] locates every occurrence of a keyword, a
//! [`ProximityWindow`] cuts the surrounding text, and a rule-specific
//! extractor turns each window into scored candidates. [`BestCandidate`]
//! keeps the winner: only a strictly greater score replaces it, so ties go
//! to whatever was seen first (earlier keyword, then earlier occurrence,
//! then earlier pattern).

use regex::{Match, Regex};
use tracing::trace;

use super::normalize::char_window;
use super::ScoredCandidate;

/// How much text around a keyword occurrence is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityWindow {
    /// `n` characters before the keyword through `n` characters after it.
    Around(usize),
    /// `n` characters starting at the keyword itself.
    From(usize),
    /// `n` characters starting right after the keyword.
    After(usize),
}

impl ProximityWindow {
    /// Cut the window for a keyword spanning bytes `start..end` of `text`.
    pub fn slice<'t>(&self, text: &'t str, start: usize, end: usize) -> &'t str {
        match *self {
            ProximityWindow::Around(n) => char_window(text, start, end, n, n),
            ProximityWindow::From(n) => char_window(text, start, start, 0, n),
            ProximityWindow::After(n) => char_window(text, end, end, 0, n),
        }
    }
}

/// A keyword with its surface-form variants and priority.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    /// Canonical keyword, used for logging.
    pub name: &'static str,
    /// Priority; higher outranks lower.
    pub priority: f32,
    patterns: Vec<Regex>,
}

impl KeywordRule {
    /// Build a rule from regex variants, tried in the given order.
    pub fn new(name: &'static str, priority: f32, patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("invalid keyword pattern {p}: {e}")))
            .collect();
        Self {
            name,
            priority,
            patterns,
        }
    }

    /// Build a rule matching `name` literally.
    pub fn literal(name: &'static str, priority: f32) -> Self {
        Self::new(name, priority, &[&regex::escape(name)])
    }

    /// Every occurrence of the first variant that occurs in `text` at all.
    pub fn occurrences<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        self.patterns
            .iter()
            .map(|p| p.find_iter(text).collect::<Vec<_>>())
            .find(|found| !found.is_empty())
            .unwrap_or_default()
    }

    /// The proximity windows around every occurrence, in text order.
    pub fn windows<'t>(&self, text: &'t str, window: ProximityWindow) -> Vec<&'t str> {
        self.occurrences(text)
            .into_iter()
            .map(|m| window.slice(text, m.start(), m.end()))
            .collect()
    }
}

/// Tracks the best-scored candidate seen so far.
#[derive(Debug, Clone)]
pub struct BestCandidate<T> {
    best: Option<ScoredCandidate<T>>,
}

impl<T> BestCandidate<T> {
    pub fn new() -> Self {
        Self { best: None }
    }

    /// Offer a candidate; it wins only with a strictly greater score.
    pub fn offer(&mut self, candidate: ScoredCandidate<T>) -> bool {
        let wins = match &self.best {
            Some(current) => candidate.score > current.score,
            None => true,
        };
        if wins {
            self.best = Some(candidate);
        }
        wins
    }

    /// Score of the current best, if any.
    pub fn score(&self) -> Option<f32> {
        self.best.as_ref().map(|c| c.score)
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_none()
    }

    pub fn into_inner(self) -> Option<ScoredCandidate<T>> {
        self.best
    }
}

impl<T> Default for BestCandidate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<ScoredCandidate<T>> for BestCandidate<T> {
    fn from_iter<I: IntoIterator<Item = ScoredCandidate<T>>>(iter: I) -> Self {
        let mut best = Self::new();
        for candidate in iter {
            best.offer(candidate);
        }
        best
    }
}

/// Candidates from every keyword window, in keyword order then occurrence
/// order. `extract` receives the window and the rule that produced it.
pub fn collect_near_keywords<T, F>(
    text: &str,
    rules: &[KeywordRule],
    window: ProximityWindow,
    mut extract: F,
) -> Vec<ScoredCandidate<T>>
where
    F: FnMut(&str, &KeywordRule) -> Vec<ScoredCandidate<T>>,
{
    let mut candidates = Vec::new();
    for rule in rules {
        for slice in rule.windows(text, window) {
            let found = extract(slice, rule);
            trace!(keyword = rule.name, count = found.len(), "keyword window scanned");
            candidates.extend(found);
        }
    }
    candidates
}

/// The single best candidate across every keyword window.
pub fn best_near_keywords<T, F>(
    text: &str,
    rules: &[KeywordRule],
    window: ProximityWindow,
    extract: F,
) -> Option<ScoredCandidate<T>>
where
    F: FnMut(&str, &KeywordRule) -> Vec<ScoredCandidate<T>>,
{
    collect_near_keywords(text, rules, window, extract)
        .into_iter()
        .collect::<BestCandidate<T>>()
        .into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_windows_cover_every_occurrence() {
        let rule = KeywordRule::literal("合計", 1.0);
        let text = "小計 100 合計 200 合計 300";

        let windows = rule.windows(text, ProximityWindow::After(4));
        assert_eq!(windows, vec![" 200", " 300"]);
    }

    #[test]
    fn test_first_occurring_variant_wins() {
        let rule = KeywordRule::new("発行日", 5.0, &["発行日", r"(?i)Issue\s*Date"]);

        let text = "Issue Date 2024/01/01";
        assert_eq!(rule.occurrences(text).len(), 1);

        let text = "発行日 2024/01/01 Issue Date 2024/02/01";
        let found = rule.occurrences(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].as_str(), "発行日");
    }

    #[test]
    fn test_window_shapes() {
        let text = "abcdeKEYfghij";
        let start = 5;
        let end = 8;

        assert_eq!(ProximityWindow::Around(2).slice(text, start, end), "deKEYfg");
        assert_eq!(ProximityWindow::From(4).slice(text, start, end), "KEYf");
        assert_eq!(ProximityWindow::After(4).slice(text, start, end), "fghi");
    }

    #[test]
    fn test_best_candidate_keeps_first_on_tie() {
        let best: BestCandidate<&str> = vec![
            ScoredCandidate::new("first", 2.0, ""),
            ScoredCandidate::new("second", 2.0, ""),
            ScoredCandidate::new("low", 1.0, ""),
        ]
        .into_iter()
        .collect();

        assert_eq!(best.into_inner().unwrap().value, "first");
    }

    #[test]
    fn test_best_candidate_strictly_greater_replaces() {
        let mut best = BestCandidate::new();
        assert!(best.offer(ScoredCandidate::new(1, 1.0, "")));
        assert!(!best.offer(ScoredCandidate::new(2, 1.0, "")));
        assert!(best.offer(ScoredCandidate::new(3, 1.5, "")));
        assert_eq!(best.score(), Some(1.5));
        assert_eq!(best.into_inner().unwrap().value, 3);
    }

    #[test]
    fn test_best_near_keywords_across_rules() {
        let rules = vec![KeywordRule::literal("A", 1.0), KeywordRule::literal("B", 2.0)];
        let text = "A x B y";

        let best = best_near_keywords(text, &rules, ProximityWindow::After(2), |window, rule| {
            vec![ScoredCandidate::new(window.trim().to_string(), rule.priority, window)]
        });

        assert_eq!(best.unwrap().value, "y");
    }
}
