//! Common regex patterns and keyword tables for business document extraction.

use lazy_static::lazy_static;
use regex::Regex;

use super::calendar::{Era, ERAS};
use super::proximity::KeywordRule;

/// Hiragana, katakana and CJK ideograph ranges.
const JAPANESE_SCRIPT: &str = r"\u{3040}-\u{309F}\u{30A0}-\u{30FF}\u{4E00}-\u{9FAF}";

lazy_static! {
    // Era dates: 令和5年4月1日, 平成31-4-30, 令和元年5月1日
    pub static ref ERA_DATES: Vec<(Era, Regex)> = ERAS
        .iter()
        .map(|era| {
            let pattern = format!(
                r"{}\s*([0-9]{{1,2}}|元)\s*[年\-/]\s*([0-9]{{1,2}})\s*[月\-/]\s*([0-9]{{1,2}})\s*[日\s]?",
                era.name
            );
            (*era, Regex::new(&pattern).unwrap())
        })
        .collect();

    // Western date shapes, in priority order
    pub static ref DATE_KANJI_YMD: Regex = Regex::new(
        r"([0-9]{4})\s*年\s*([0-9]{1,2})\s*月\s*([0-9]{1,2})\s*日\s*(?:\([月火水木金土日]\))?"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"([0-9]{4})[/\-.]\s*([0-9]{1,2})[/\-.]\s*([0-9]{1,2})\s*(?:\([月火水木金土日]\))?"
    ).unwrap();

    pub static ref DATE_MDY: Regex = Regex::new(
        r"([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})"
    ).unwrap();

    pub static ref DATE_SHORT_YMD: Regex = Regex::new(
        r"([0-9]{2})[/\-.]\s*([0-9]{1,2})[/\-.]\s*([0-9]{1,2})"
    ).unwrap();

    pub static ref DATE_DMY: Regex = Regex::new(
        r"([0-9]{1,2})/([0-9]{1,2})/([0-9]{2,4})"
    ).unwrap();

    // Labeled dates, highest priority first
    pub static ref DATE_KEYWORDS: Vec<KeywordRule> = vec![
        KeywordRule::new("発行日", 5.0, &["発行日", r"発行\s*日", r"(?i)Issue\s*Date"]),
        KeywordRule::new("請求日", 4.0, &["請求日", r"請求\s*日", r"(?i)Billing\s*Date"]),
        KeywordRule::new("作成日", 3.0, &["作成日", r"作成\s*日", r"(?i)Created\s*Date"]),
        KeywordRule::new("申請日", 2.0, &["申請日", r"申請\s*日", r"(?i)Applied\s*Date"]),
        KeywordRule::new("Date:", 1.0, &[r"(?i)\bDate\b", r"(?i)\bDATE\b", "日付"]),
    ];

    // Party sections
    pub static ref SUBJECT_KEYWORDS: Vec<KeywordRule> = ["発行者", "発行元", "請求元", "発注者", "From", "貴社名", "会社名"]
        .into_iter()
        .map(|k| KeywordRule::literal(k, 0.0))
        .collect();

    pub static ref RECIPIENT_KEYWORDS: Vec<KeywordRule> = ["宛先", "請求先", "御中", "To", "ご担当者"]
        .into_iter()
        .map(|k| KeywordRule::literal(k, 0.0))
        .collect();

    // Company name followed by its legal form: サンプル株式会社, Example Corp.
    pub static ref CORPORATE_SUFFIXED: Regex = Regex::new(&format!(
        r"(?i)([A-Za-z0-9_\s{JAPANESE_SCRIPT}]+?)(株式会社|合同会社|有限会社|(?:LLC|Inc|Corp|Ltd)\b\.?)"
    )).unwrap();

    // Legal form first: 株式会社サンプル
    pub static ref CORPORATE_PREFIXED: Regex = Regex::new(&format!(
        r"(株式会社|合同会社|有限会社)\s*([A-Za-z0-9_{JAPANESE_SCRIPT}]{{1,20}})"
    )).unwrap();

    // Individuals with an honorific: 田中太郎様
    pub static ref HONORIFIC_NAME: Regex = Regex::new(
        r"(\S{2,20})(様|さん|殿)"
    ).unwrap();

    pub static ref JAPANESE_RUN: Regex = Regex::new(&format!(
        r"[{JAPANESE_SCRIPT}]{{2,10}}"
    )).unwrap();

    pub static ref LEGAL_ENTITY: Regex = Regex::new(
        r"(?i)(株式会社|合同会社|有限会社|\b(?:LLC|Inc|Corp|Co|Ltd)\b\.?)"
    ).unwrap();

    // Trailing honorific only: さんぽ商店 keeps its さん
    pub static ref HONORIFIC: Regex = Regex::new(
        r"(様|さん|殿|御中)\s*$"
    ).unwrap();

    // Prefecture/city/ward markers, block and lot numbers, postal codes
    pub static ref ADDRESS_MARKER: Regex = Regex::new(
        r"(都|道|府|県|市|区|丁目|番地|[0-9]{3}-[0-9]{4})"
    ).unwrap();

    pub static ref EMAIL_OR_URL: Regex = Regex::new(
        r"(?i)(@|http)"
    ).unwrap();

    pub static ref LATIN_NAME: Regex = Regex::new(
        r"^[A-Za-z\s]+$"
    ).unwrap();

    // Amount keywords, all equal
    pub static ref AMOUNT_KEYWORDS: Vec<KeywordRule> = ["合計", "請求金額", "総計", "お支払金額", "支払額"]
        .into_iter()
        .map(|k| KeywordRule::literal(k, 0.0))
        .collect();

    // Amount patterns, most specific first
    pub static ref AMOUNT_YEN_PREFIXED: Regex = Regex::new(
        r"[¥￥]\s?([0-9,]+(?:\.[0-9]{2})?)"
    ).unwrap();

    pub static ref AMOUNT_YEN_SUFFIXED: Regex = Regex::new(
        r"([0-9,]+)\s?円"
    ).unwrap();

    pub static ref AMOUNT_BARE: Regex = Regex::new(
        r"([0-9,]+(?:\.[0-9]{2})?)"
    ).unwrap();
}

/// Marker for an amount that includes consumption tax.
pub const TAX_INCLUDED: &str = "税込";
