//! Japanese era calendar resolution.

use crate::error::ExtractionError;

/// A Japanese era and the western year of its first year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Era {
    pub name: &'static str,
    pub start_year: i32,
}

/// Supported eras, most recent first.
pub const ERAS: [Era; 3] = [
    Era { name: "令和", start_year: 2019 },
    Era { name: "平成", start_year: 1989 },
    Era { name: "昭和", start_year: 1926 },
];

/// Longest era year accepted; no supported era ran past 64.
const MAX_ERA_YEAR: u32 = 99;

/// Look up an era by name.
pub fn find_era(name: &str) -> Option<&'static Era> {
    ERAS.iter().find(|era| era.name == name)
}

/// Convert an era name and era year into a western year.
///
/// Pure arithmetic: the caller still has to check the result against its
/// accepted year range.
pub fn resolve_era(name: &str, era_year: u32) -> Result<i32, ExtractionError> {
    let era = find_era(name).ok_or_else(|| ExtractionError::UnknownEra(name.to_string()))?;

    if era_year == 0 || era_year > MAX_ERA_YEAR {
        return Err(ExtractionError::EraYearOutOfRange {
            era: name.to_string(),
            year: era_year,
        });
    }

    Ok(era.start_year + era_year as i32 - 1)
}

/// Parse the era-year token of a date: digits, or `元` for the first year.
pub fn parse_era_year(token: &str) -> Option<u32> {
    if token == "元" {
        return Some(1);
    }
    token.parse().ok()
}
