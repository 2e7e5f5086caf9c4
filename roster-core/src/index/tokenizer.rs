use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[a-z0-9]+").expect("token pattern is valid"))
}

/// Split a field value into lowercase alphanumeric tokens. Punctuation in
/// contact strings (dots in email domains, dashes in phone numbers) acts as
/// a separator so every stored value stays reachable by query.
pub fn tokenize_text(text: &str) -> HashSet<String> {
    token_pattern()
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokenize a free-text query with the same rules as indexed fields.
/// Duplicates collapse so repeating a word cannot inflate a match score.
pub fn tokenize_query(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = tokenize_text(query).into_iter().collect();
    tokens.sort();
    tokens
}
