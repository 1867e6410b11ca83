//! Decides whether a literal fragment is worth extracting.

use crate::config::Config;
use crate::utils::contains_target_script;

/// Single characters that are never extracted on their own.
const LONE_PUNCTUATION: &[char] = &[
    '，', '。', '、', '！', '？', '；', '：', '“', '”', '‘', '’', '（', '）', '【', '】', '《',
    '》', '「', '」', '『', '』', '"', '\'',
];

/// Returns true when `text` should be moved into the catalog.
pub fn is_eligible(text: &str, config: &Config) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    if !contains_target_script(trimmed) {
        return false;
    }
    if config.excluded_strings.iter().any(|s| s == trimmed) {
        return false;
    }
    !is_lone_punctuation(trimmed)
}

fn is_lone_punctuation(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => LONE_PUNCTUATION.contains(&c) || c.is_ascii_digit(),
        _ => false,
    }
}
