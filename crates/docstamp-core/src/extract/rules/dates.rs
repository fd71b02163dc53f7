//! Transaction date extraction for business documents.
//!
//! Dates are matched by shape (era, `YYYY年M月D日`, ISO-like, US, short-year,
//! EU), checked for plausibility against today's date, and ranked by the
//! label they sit next to. The winner is rendered as a six-digit `YYMMDD`
//! token.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::models::config::DateConfig;

use super::calendar::{parse_era_year, resolve_era};
use super::normalize::normalize_text;
use super::patterns::{
    DATE_DMY, DATE_KANJI_YMD, DATE_KEYWORDS, DATE_MDY, DATE_SHORT_YMD, DATE_YMD, ERA_DATES,
};
use super::proximity::{best_near_keywords, ProximityWindow};
use super::{FieldExtractor, ScoredCandidate};

/// Year/month/day triple straight from a pattern match.
///
/// Only the shape is checked: month in 1..=12 and day in 1..=31. Whether the
/// day exists in that month is left to [`DateValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCandidate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateCandidate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            Some(Self { year, month, day })
        } else {
            None
        }
    }

    /// The calendar date, if it exists.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Six-digit `YYMMDD` date token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedDate(String);

impl NormalizedDate {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!(
            "{:02}{:02}{:02}",
            date.year().rem_euclid(100),
            date.month(),
            date.day()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Field order of a western date shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateOrder {
    /// Four-digit year first.
    Ymd,
    /// US order, four-digit year last.
    Mdy,
    /// Two-digit year first.
    ShortYmd,
    /// European order, two- to four-digit year last.
    Dmy,
}

fn western_shapes() -> [(&'static Regex, DateOrder); 5] {
    [
        (&*DATE_KANJI_YMD, DateOrder::Ymd),
        (&*DATE_YMD, DateOrder::Ymd),
        (&*DATE_MDY, DateOrder::Mdy),
        (&*DATE_SHORT_YMD, DateOrder::ShortYmd),
        (&*DATE_DMY, DateOrder::Dmy),
    ]
}

/// Finds the first date in a piece of text, trying shapes in priority order.
#[derive(Debug, Clone)]
pub struct DatePatternMatcher {
    min_year: i32,
    max_year: i32,
    two_digit_pivot: i32,
}

impl DatePatternMatcher {
    pub fn new(config: &DateConfig) -> Self {
        Self {
            min_year: config.min_year,
            max_year: config.max_year,
            two_digit_pivot: config.two_digit_pivot,
        }
    }

    /// Match the first date shape that yields a usable candidate.
    ///
    /// Era dates are tried before any western shape. For each shape only the
    /// leftmost match counts; if it is not shape-valid the next shape is tried.
    pub fn match_date(&self, text: &str) -> Option<ScoredCandidate<DateCandidate>> {
        let text = normalize_text(text);

        for (era, regex) in ERA_DATES.iter() {
            let Some(caps) = regex.captures(&text) else {
                continue;
            };
            let Some(era_year) = parse_era_year(&caps[1]) else {
                continue;
            };
            let year = match resolve_era(era.name, era_year) {
                Ok(year) => year,
                Err(e) => {
                    trace!("skipping era date {}: {}", &caps[0], e);
                    continue;
                }
            };
            if let Some(candidate) = self.candidate(year, &caps[2], &caps[3]) {
                return Some(to_scored(candidate, &caps));
            }
        }

        for (regex, order) in western_shapes() {
            let Some(caps) = regex.captures(&text) else {
                continue;
            };
            let (year, month, day) = match order {
                DateOrder::Ymd => (parse_number(&caps[1]), &caps[2], &caps[3]),
                DateOrder::Mdy => (parse_number(&caps[3]), &caps[1], &caps[2]),
                DateOrder::ShortYmd => (self.expand_year(&caps[1]), &caps[2], &caps[3]),
                DateOrder::Dmy => (self.expand_year(&caps[3]), &caps[2], &caps[1]),
            };
            if let Some(candidate) = self.candidate(year, month, day) {
                return Some(to_scored(candidate, &caps));
            }
        }

        None
    }

    fn candidate(&self, year: i32, month: &str, day: &str) -> Option<DateCandidate> {
        if year < self.min_year || year > self.max_year {
            return None;
        }
        DateCandidate::new(year, month.parse().ok()?, day.parse().ok()?)
    }

    /// Two-digit years above the pivot are 19xx, the rest 20xx.
    fn expand_year(&self, digits: &str) -> i32 {
        let year = parse_number(digits);
        if year >= 100 {
            year
        } else if year > self.two_digit_pivot {
            1900 + year
        } else {
            2000 + year
        }
    }
}

impl Default for DatePatternMatcher {
    fn default() -> Self {
        Self::new(&DateConfig::default())
    }
}

fn parse_number(digits: &str) -> i32 {
    digits.parse().unwrap_or(0)
}

fn to_scored(candidate: DateCandidate, caps: &Captures<'_>) -> ScoredCandidate<DateCandidate> {
    let full = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
    ScoredCandidate::new(candidate, 0.0, &caps[0]).with_position(full.0, full.1)
}

/// Match the first date in `text` with the default year rules.
pub fn match_date(text: &str) -> Option<DateCandidate> {
    DatePatternMatcher::default().match_date(text).map(|m| m.value)
}

/// Rejects dates that cannot exist or are implausible for a live document.
#[derive(Debug, Clone)]
pub struct DateValidator {
    min_year: i32,
    max_year: i32,
    earliest: NaiveDate,
    latest: NaiveDate,
}

impl DateValidator {
    pub fn new(today: NaiveDate, config: &DateConfig) -> Self {
        let earliest = u32::try_from(config.past_years.max(0))
            .ok()
            .and_then(|years| years.checked_mul(12))
            .and_then(|months| today.checked_sub_months(Months::new(months)))
            .unwrap_or(NaiveDate::MIN);
        let latest = today
            .checked_add_days(Days::new(config.future_days.max(0) as u64))
            .unwrap_or(NaiveDate::MAX);

        Self {
            min_year: config.min_year,
            max_year: config.max_year,
            earliest,
            latest,
        }
    }

    /// The calendar date, if it exists and lies within the plausibility window.
    pub fn validate(&self, candidate: &DateCandidate) -> Option<NaiveDate> {
        if candidate.year < self.min_year || candidate.year > self.max_year {
            return None;
        }
        let date = candidate.to_date()?;
        if date < self.earliest || date > self.latest {
            trace!("date {} outside {}..={}", date, self.earliest, self.latest);
            return None;
        }
        Some(date)
    }
}

/// Date field extractor.
///
/// Dates next to an issue-date label beat billing-date labels, and so on down
/// to a bare `Date:`. Within one window the first matching shape wins.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    matcher: DatePatternMatcher,
    validator: DateValidator,
    today: NaiveDate,
    radius: usize,
}

impl DateExtractor {
    pub fn new(today: NaiveDate, config: &DateConfig) -> Self {
        Self {
            matcher: DatePatternMatcher::new(config),
            validator: DateValidator::new(today, config),
            today,
            radius: config.keyword_radius,
        }
    }

    /// The first plausible date in `text`, scored with `priority`.
    fn validated(&self, text: &str, priority: f32) -> Option<ScoredCandidate<NaiveDate>> {
        let found = self.matcher.match_date(text)?;
        let date = self.validator.validate(&found.value)?;
        let (start, end) = found.position.unwrap_or_default();
        Some(ScoredCandidate::new(date, priority, found.source).with_position(start, end))
    }

    /// Resolve the document date, falling back to today.
    pub fn extract_normalized(&self, text: &str) -> NormalizedDate {
        match self.extract(text) {
            Some(found) => NormalizedDate::from_date(found.value),
            None => {
                debug!("no plausible date found, using today ({})", self.today);
                NormalizedDate::from_date(self.today)
            }
        }
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ScoredCandidate<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let window = ProximityWindow::Around(self.radius);
        let near = best_near_keywords(text, &DATE_KEYWORDS, window, |slice, rule| {
            self.validated(slice, rule.priority).into_iter().collect()
        });

        if let Some(found) = near {
            debug!("date {} found near a keyword (priority {})", found.value, found.score);
            return Some(found);
        }

        let found = self.validated(text, 0.0);
        if let Some(found) = &found {
            debug!("date {} found in whole-text scan", found.value);
        }
        found
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let window = ProximityWindow::Around(self.radius);
        let mut results = Vec::new();

        for rule in DATE_KEYWORDS.iter() {
            for slice in rule.windows(text, window) {
                results.extend(self.validated(slice, rule.priority));
            }
        }
        results.extend(self.validated(text, 0.0));

        results
    }
}
