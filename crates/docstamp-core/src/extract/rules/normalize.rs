//! Text canonicalization and character-based slicing.
//!
//! Windows around keywords are measured in characters, not bytes, so the
//! helpers here translate character counts into byte offsets that are always
//! on `char` boundaries.

/// Offset between a full-width digit and its ASCII counterpart.
const FULL_WIDTH_OFFSET: u32 = 0xFEE0;

/// Canonicalize document text before date matching.
///
/// Full-width digits become ASCII digits, full-width slash and dash variants
/// become `/` and `-`, runs of whitespace collapse to one space, and the
/// result is trimmed. Applying it twice gives the same result as once.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(half_width(c));
    }

    out
}

fn half_width(c: char) -> char {
    match c {
        '\u{FF10}'..='\u{FF19}' => char::from_u32(c as u32 - FULL_WIDTH_OFFSET).unwrap_or(c),
        '\u{FF0F}' => '/',
        '\u{FF0D}' | '\u{2010}' | '\u{2212}' => '-',
        _ => c,
    }
}

/// The first `limit` characters of `text`.
pub fn char_prefix(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Slice `text` from `before` characters ahead of byte offset `start` to
/// `after` characters past byte offset `end`, clamped to the text.
pub fn char_window(text: &str, start: usize, end: usize, before: usize, after: usize) -> &str {
    let from = if before == 0 {
        start
    } else {
        text[..start]
            .char_indices()
            .rev()
            .take(before)
            .last()
            .map_or(start, |(idx, _)| idx)
    };
    let to = text[end..]
        .char_indices()
        .nth(after)
        .map_or(text.len(), |(idx, _)| end + idx);

    &text[from..to]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_width_digits_and_separators() {
        assert_eq!(normalize_text("２０２４／０１－１５"), "2024/01-15");
        assert_eq!(normalize_text("令和５年４月１日"), "令和5年4月1日");
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        assert_eq!(normalize_text("  発行日 :\n\t2024年\u{3000}1月 "), "発行日 : 2024年 1月");
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_text(" 請求日：２０２５／０３／１０ (月)\n合計 ");
        assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("請求書です", 3), "請求書");
        assert_eq!(char_prefix("abc", 10), "abc");
        assert_eq!(char_prefix("abc", 0), "");
    }

    #[test]
    fn test_char_window_counts_characters() {
        let text = "あいうえおKEYかきくけこ";
        let start = text.find("KEY").unwrap();
        let end = start + 3;

        assert_eq!(char_window(text, start, end, 2, 2), "えおKEYかき");
        assert_eq!(char_window(text, start, end, 50, 50), text);
        assert_eq!(char_window(text, start, end, 0, 0), "KEY");
    }
}
