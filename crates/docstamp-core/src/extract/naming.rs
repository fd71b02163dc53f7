//! File-name construction from extracted metadata.

use std::collections::HashSet;
use std::path::Path;

use super::rules::NormalizedDate;

/// The naming token handed back to callers: `YYMMDD_`.
pub fn suggested_name(date: &NormalizedDate) -> String {
    format!("{date}_")
}

/// Lower-cased extension of `file_name`, if it has one.
fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Final file name for a renamed document.
///
/// `custom_name` is the name body chosen for the file (usually the suggested
/// token, possibly edited); a trailing copy of the original extension typed
/// into it is dropped before the lower-cased original extension is appended.
pub fn final_file_name(custom_name: &str, original_file_name: &str) -> String {
    let body = custom_name.trim();

    let Some(extension) = extension_of(original_file_name) else {
        return body.to_string();
    };

    let suffix = format!(".{extension}");
    let body = match body.len().checked_sub(suffix.len()) {
        Some(cut) if body.is_char_boundary(cut) && body[cut..].eq_ignore_ascii_case(&suffix) => {
            &body[..cut]
        }
        _ => body,
    };

    format!("{body}{suffix}")
}

/// `name` itself if unused, otherwise `stem_N.ext` with the smallest free N.
pub fn unique_file_name(name: &str, used: &HashSet<String>) -> String {
    if !used.contains(name) {
        return name.to_string();
    }

    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    (1..)
        .map(|n| match extension {
            Some(ext) => format!("{stem}_{n}.{ext}"),
            None => format!("{stem}_{n}"),
        })
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}
