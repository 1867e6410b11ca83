//! Common utility functions shared across the codebase.

/// Returns true for CJK Unified Ideographs and Extension A.
pub fn is_target_script_char(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}')
}

/// Checks if the text contains at least one Chinese ideograph.
///
/// Punctuation, kana and hangul do not count.
///
/// # Examples
///
/// ```
/// use i18n_auto::utils::contains_target_script;
///
/// assert!(contains_target_script("你好"));
/// assert!(contains_target_script("Hello 世界"));
/// assert!(!contains_target_script("Hello"));
/// assert!(!contains_target_script("，。"));
/// assert!(!contains_target_script(""));
/// ```
pub fn contains_target_script(text: &str) -> bool {
    text.chars().any(is_target_script_char)
}

/// Truncate `text` so that its display width does not exceed `max_width`,
/// appending an ellipsis when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str("...");
    out
}
