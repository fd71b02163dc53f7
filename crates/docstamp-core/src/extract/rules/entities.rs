//! Counter-party name extraction.
//!
//! Candidates come from three generators: company names carrying a legal
//! form, personal names carrying an honorific, and bare runs of Japanese
//! script. Candidates near a party keyword and candidates from the whole
//! text are pooled and ranked together.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::models::config::EntityConfig;

use super::patterns::{
    ADDRESS_MARKER, CORPORATE_PREFIXED, CORPORATE_SUFFIXED, EMAIL_OR_URL, HONORIFIC,
    HONORIFIC_NAME, JAPANESE_RUN, LATIN_NAME, LEGAL_ENTITY, RECIPIENT_KEYWORDS, SUBJECT_KEYWORDS,
};
use super::proximity::{collect_near_keywords, BestCandidate, KeywordRule, ProximityWindow};
use super::{FieldExtractor, ScoredCandidate};

/// How a candidate name was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Carries a legal-entity form (株式会社, Inc., ...).
    Corporate,
    /// Carries an honorific (様, さん, 殿).
    Individual,
    /// A bare run of Japanese script.
    General,
}

/// Which side of the transaction to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    /// The issuer or sender.
    Subject,
    /// The addressee.
    Recipient,
}

impl PartyRole {
    pub fn from_is_subject(is_subject: bool) -> Self {
        if is_subject {
            PartyRole::Subject
        } else {
            PartyRole::Recipient
        }
    }

    fn keywords(self) -> &'static [KeywordRule] {
        match self {
            PartyRole::Subject => &SUBJECT_KEYWORDS,
            PartyRole::Recipient => &RECIPIENT_KEYWORDS,
        }
    }
}

/// A provisional party name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCandidate {
    pub name: String,
    pub kind: EntityKind,
}

/// Every name candidate in `text`, unscored, in generator order.
pub fn entity_candidates(text: &str) -> Vec<ScoredCandidate<EntityCandidate>> {
    let mut candidates = Vec::new();

    for caps in CORPORATE_SUFFIXED.captures_iter(text) {
        let name = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            continue;
        }
        let suffix = &caps[2];
        let joiner = if suffix.is_ascii() { " " } else { "" };
        let full = caps.get(0).unwrap();
        candidates.push(
            ScoredCandidate::new(
                EntityCandidate {
                    name: format!("{name}{joiner}{suffix}"),
                    kind: EntityKind::Corporate,
                },
                0.0,
                full.as_str(),
            )
            .with_position(full.start(), full.end()),
        );
    }

    for caps in CORPORATE_PREFIXED.captures_iter(text) {
        let full = caps.get(0).unwrap();
        // 山田商事株式会社 御中: the legal form belongs to the preceding name
        if continues_name(text, full.start()) {
            continue;
        }
        candidates.push(
            ScoredCandidate::new(
                EntityCandidate {
                    name: format!("{}{}", &caps[1], &caps[2]),
                    kind: EntityKind::Corporate,
                },
                0.0,
                full.as_str(),
            )
            .with_position(full.start(), full.end()),
        );
    }

    for caps in HONORIFIC_NAME.captures_iter(text) {
        let full = caps.get(0).unwrap();
        candidates.push(
            ScoredCandidate::new(
                EntityCandidate {
                    name: full.as_str().to_string(),
                    kind: EntityKind::Individual,
                },
                0.0,
                full.as_str(),
            )
            .with_position(full.start(), full.end()),
        );
    }

    for m in JAPANESE_RUN.find_iter(text) {
        candidates.push(
            ScoredCandidate::new(
                EntityCandidate {
                    name: m.as_str().to_string(),
                    kind: EntityKind::General,
                },
                0.0,
                m.as_str(),
            )
            .with_position(m.start(), m.end()),
        );
    }

    candidates
}

fn continues_name(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric())
}

/// Strip legal forms and honorifics; title-case all-Latin names.
pub fn display_name(name: &str) -> String {
    let stripped = LEGAL_ENTITY.replace_all(name, "");
    let stripped = HONORIFIC.replace_all(&stripped, "");
    let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if LATIN_NAME.is_match(&cleaned) {
        title_case(&cleaned)
    } else {
        cleaned
    }
}

fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

/// Counter-party name extractor.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    role: PartyRole,
    config: EntityConfig,
}

impl EntityExtractor {
    pub fn new(role: PartyRole, config: EntityConfig) -> Self {
        Self { role, config }
    }

    pub fn subject() -> Self {
        Self::new(PartyRole::Subject, EntityConfig::default())
    }

    pub fn recipient() -> Self {
        Self::new(PartyRole::Recipient, EntityConfig::default())
    }

    /// Final score: proximity bonus, plus corporate bonus, minus address
    /// penalty; zero for e-mail addresses and URLs.
    fn rank(&self, candidate: ScoredCandidate<EntityCandidate>) -> ScoredCandidate<EntityCandidate> {
        let name = &candidate.value.name;
        let mut score = candidate.score;

        if LEGAL_ENTITY.is_match(name) {
            score += self.config.corporate_bonus as f32;
        }
        if ADDRESS_MARKER.is_match(name) {
            score -= self.config.address_penalty as f32;
        }
        if EMAIL_OR_URL.is_match(name) {
            score = 0.0;
        }

        trace!(name = name.as_str(), score, "entity candidate");
        candidate.with_score(score)
    }

    /// The display name of the best candidate, or the unknown label.
    pub fn extract_name(&self, text: &str) -> String {
        let name = self
            .extract(text)
            .map(|found| display_name(&found.value.name))
            .unwrap_or_default();

        if name.is_empty() {
            debug!(role = ?self.role, "no usable party name");
            self.config.unknown_label.clone()
        } else {
            name
        }
    }
}

impl FieldExtractor for EntityExtractor {
    type Output = ScoredCandidate<EntityCandidate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text)
            .into_iter()
            .filter(|c| c.score > 0.0)
            .collect::<BestCandidate<_>>()
            .into_inner()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let keyword_bonus = self.config.keyword_bonus as f32;
        let fallback_bonus = self.config.fallback_bonus as f32;

        let mut pooled = collect_near_keywords(
            text,
            self.role.keywords(),
            ProximityWindow::After(self.config.window),
            |window, _| {
                entity_candidates(window)
                    .into_iter()
                    .map(|c| c.with_score(keyword_bonus))
                    .collect()
            },
        );
        pooled.extend(
            entity_candidates(text)
                .into_iter()
                .map(|c| c.with_score(fallback_bonus)),
        );

        pooled.into_iter().map(|c| self.rank(c)).collect()
    }
}
