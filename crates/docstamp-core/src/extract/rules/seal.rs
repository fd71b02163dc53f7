//! Seal and signature detection.

/// Keywords that indicate a seal impression or signature.
const SEAL_KEYWORDS: [&str; 8] = ["印", "署名", "サイン", "seal", "signature", "sign", "印鑑", "押印"];

/// Whether the text mentions a seal or signature (case-insensitive).
pub fn detect_seal(text: &str) -> bool {
    let lowered = text.to_lowercase();
    SEAL_KEYWORDS.iter().any(|keyword| lowered.contains(*keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_japanese_keywords() {
        assert!(detect_seal("代表取締役 山田太郎 印"));
        assert!(detect_seal("ご署名ください"));
        assert!(detect_seal("押印欄"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(detect_seal("Company SEAL"));
        assert!(detect_seal("Authorized Signature"));
        assert!(detect_seal("SIGN HERE"));
    }

    #[test]
    fn test_no_seal() {
        assert!(!detect_seal("請求書 合計 ¥10,000"));
        assert!(!detect_seal(""));
    }
}
