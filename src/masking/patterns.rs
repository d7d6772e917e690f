//! Lexical patterns shared by masking and unmasking

use regex::Regex;
use std::sync::OnceLock;

/// Token lexical contract. Collaborators may recognize tokens independently,
/// so this must not change.
pub const TOKEN_PATTERN: &str = r"[A-Z_]+_[0-9]+";

/// `<key>: <rest of line>` literal embedded in a string value. One trailing
/// newline is tolerated and dropped.
pub const KEY_PAIR_PATTERN: &str = r"^([\w\-]+):\s+(.*)\n?$";

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
static TOKEN_EXACT_REGEX: OnceLock<Regex> = OnceLock::new();
static KEY_PAIR_REGEX: OnceLock<Regex> = OnceLock::new();

/// Regex locating tokens inside free text
pub fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

fn token_exact_regex() -> &'static Regex {
    TOKEN_EXACT_REGEX.get_or_init(|| {
        Regex::new(&format!("^{TOKEN_PATTERN}$")).expect("token pattern is valid")
    })
}

/// Regex for string-embedded key/value literals
pub fn key_pair_regex() -> &'static Regex {
    KEY_PAIR_REGEX.get_or_init(|| Regex::new(KEY_PAIR_PATTERN).expect("key pair pattern is valid"))
}

/// Whether `s` as a whole is token-shaped
pub fn is_token_shaped(s: &str) -> bool {
    token_exact_regex().is_match(s)
}

/// Split a `<key>: <rest>` literal into its parts
pub fn split_key_pair(s: &str) -> Option<(&str, &str)> {
    let caps = key_pair_regex().captures(s)?;
    let key = caps.get(1)?.as_str();
    let rest = caps.get(2)?.as_str();
    Some((key, rest))
}
