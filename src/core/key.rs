//! Catalog key derivation.

/// Prefix shared by every generated key.
const KEY_PREFIX: &str = "i18n-auto-";

/// Number of hex digits of the digest kept in a key.
const DIGEST_LEN: usize = 8;

/// Derive the catalog key for a piece of text.
///
/// The key depends only on the text, so the same literal found in different
/// files (or on different runs) always maps to the same catalog entry.
pub fn derive_key(text: &str) -> String {
    let digest = format!("{:x}", md5::compute(text.as_bytes()));
    format!("{}{}", KEY_PREFIX, &digest[..DIGEST_LEN])
}
