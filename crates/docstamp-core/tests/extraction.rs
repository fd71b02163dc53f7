use std::collections::HashSet;

use chrono::NaiveDate;
use docstamp_core::{
    analyze_at, build_suggested_name, build_suggested_name_at, detect_seal, extract_amount,
    extract_date_at, extract_document_type, extract_entity, final_file_name, unique_file_name,
    DocumentMetadata,
};
use pretty_assertions::assert_eq;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

const CONTRACT: &str = "業務委託契約書\n\
                        発行日：令和6年4月1日\n\
                        発行者: サンプル株式会社\n\
                        宛先: 株式会社テスト 御中\n\
                        お支払金額 550,000円（税込）\n\
                        署名";

#[test]
fn analyzes_a_full_document() {
    let metadata = analyze_at(CONTRACT, today());

    assert_eq!(
        metadata,
        DocumentMetadata {
            date: "240401".to_string(),
            document_type: "業務委託契約書".to_string(),
            subject: "サンプル".to_string(),
            counterparty: "テスト".to_string(),
            amount: Some("550,000".to_string()),
            has_seal: true,
            suggested_name: "240401_".to_string(),
        }
    );
}

#[test]
fn kanji_date_is_returned_exactly() {
    assert_eq!(extract_date_at("2024年11月5日 ご請求", today()), "241105");
    assert_eq!(extract_date_at("２０２５年１月３１日", today()), "250131");
}

#[test]
fn era_date_is_converted() {
    assert_eq!(extract_date_at("令和5年4月1日", today()), "230401");
    assert_eq!(extract_date_at("令和元年5月1日", today()), "190501");
}

#[test]
fn two_digit_year_pivot() {
    assert_eq!(extract_date_at("25/03/10", today()), "250310");
    // 1980 is a valid shape but older than twenty years
    assert_eq!(extract_date_at("80/03/10", today()), "250615");
}

#[test]
fn implausible_dates_fall_back_to_today() {
    assert_eq!(extract_date_at("発行日 2026年1月1日", today()), "250615");
    assert_eq!(extract_date_at("発行日 2004年12月31日", today()), "250615");
    assert_eq!(extract_date_at("日付なし", today()), "250615");
}

#[test]
fn issue_date_beats_generic_label() {
    let text = "Date: 2025/01/20\n\
                ご請求内容はこちらです。ご確認のほどよろしくお願い申し上げます。\n\
                発行日 2025年3月1日";

    assert_eq!(extract_date_at(text, today()), "250301");
}

#[test]
fn amount_extraction() {
    assert_eq!(extract_amount("合計 ¥1,234,567 (税込)"), Some("1,234,567".to_string()));
    assert_eq!(extract_amount("¥50"), None);
    assert_eq!(extract_amount("50,000"), Some("50,000".to_string()));
}

#[test]
fn entity_legal_suffix_is_stripped() {
    assert_eq!(extract_entity("発行元: Example Corp.", true), "Example");
    assert_eq!(extract_entity("Total Income 発行者: 山田", true), "山田");
    assert_eq!(extract_entity("", false), "不明");
}

#[test]
fn document_type_fallback() {
    assert_eq!(extract_document_type("INVOICE"), "請求書");
    assert_eq!(extract_document_type("お知らせ"), "文書");
}

#[test]
fn seal_detection_is_case_insensitive() {
    assert!(detect_seal("SiGnAtUrE"));
    assert!(detect_seal("担当印"));
    assert!(!detect_seal("請求書"));
}

#[test]
fn suggested_name_is_stable() {
    let text = "発行日 2024年1月1日";

    assert_eq!(build_suggested_name_at(text, today()), "240101_");
    assert_eq!(build_suggested_name_at(text, today()), build_suggested_name_at(text, today()));
    assert_eq!(build_suggested_name(text), build_suggested_name(text));
}

#[test]
fn metadata_serializes_without_missing_amount() {
    let metadata = analyze_at("お知らせ", today());
    let json = serde_json::to_value(&metadata).unwrap();

    assert!(json.get("amount").is_none());
    assert_eq!(json["date"], "250615");
    assert_eq!(json["has_seal"], false);
}

#[test]
fn proposed_file_names_do_not_collide() {
    let mut used = HashSet::new();
    let mut proposed = Vec::new();

    for original in ["a.PDF", "b.pdf", "c.png"] {
        let name = final_file_name(&build_suggested_name_at(CONTRACT, today()), original);
        let name = unique_file_name(&name, &used);
        used.insert(name.clone());
        proposed.push(name);
    }

    assert_eq!(proposed, vec!["240401_.pdf", "240401__1.pdf", "240401_.png"]);
}
