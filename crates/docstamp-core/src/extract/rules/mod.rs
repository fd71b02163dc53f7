//! Rule-based field extractors for business documents.

pub mod normalize;
pub mod calendar;
pub mod patterns;
pub mod proximity;
pub mod dates;
pub mod entities;
pub mod amounts;
pub mod doc_type;
pub mod seal;

pub use normalize::{normalize_text, char_prefix, char_window};
pub use calendar::{resolve_era, Era, ERAS};
pub use proximity::{KeywordRule, ProximityWindow, BestCandidate};
pub use dates::{
    match_date, DateCandidate, DateExtractor, DatePatternMatcher, DateValidator, NormalizedDate,
};
pub use entities::{display_name, entity_candidates, EntityCandidate, EntityExtractor, EntityKind, PartyRole};
pub use amounts::{format_amount, AmountExtractor};
pub use doc_type::{
    classify_document, DocumentKind, DocumentType, DocumentTypeClassifier, Modifier,
};
pub use seal::detect_seal;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the winning value according to the extractor's policy.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all candidates, in scan order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A provisional value with the score that ranks it against its rivals.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<T> {
    /// Extracted value.
    pub value: T,
    /// Ranking score; higher wins.
    pub score: f32,
    /// Byte span in the text the candidate was found in.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ScoredCandidate<T> {
    pub fn new(value: T, score: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            score,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }
}
