//! Title tokenization helpers shared by the scorer and the synthesizer.

use std::collections::HashSet;

/// Characters that separate tokens besides whitespace.
const SEPARATORS: [char; 6] = [',', '-', '/', '+', '(', ')'];

/// Split a title into tokens, dropping one-character fragments.
///
/// Original casing is preserved; callers lowercase where they need to.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|t| t.chars().count() > 1)
        .map(|t| t.to_string())
        .collect()
}

/// True for tokens that are a bare number ("250", "3.5"), which carry no
/// keyword value on their own.
pub fn is_numeric_token(token: &str) -> bool {
    let mut has_digit = false;
    for c in token.chars() {
        if c.is_ascii_digit() {
            has_digit = true;
        } else if c != '.' && c != ',' {
            return false;
        }
    }
    has_digit
}

/// Lowercased tokens with stop words and bare numbers removed.
pub fn meaningful_tokens(tokens: &[String], stop_words: &HashSet<String>) -> Vec<String> {
    tokens
        .iter()
        .map(|t| t.to_lowercase())
        .filter(|t| !stop_words.contains(t) && !is_numeric_token(t))
        .collect()
}

/// Meaningful tokens that occur more than once, in first-occurrence order.
pub fn duplicate_words(meaningful: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut reported: HashSet<&str> = HashSet::new();
    let mut duplicates = Vec::new();
    for word in meaningful {
        if !seen.insert(word) && reported.insert(word) {
            duplicates.push(word.clone());
        }
    }
    duplicates
}

/// Tokens that look like internal SKU or barcode identifiers: a long digit
/// run, or an upper-case alphanumeric code mixing letters with several
/// digits.
pub fn internal_code_tokens(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| is_internal_code(t))
        .cloned()
        .collect()
}

/// True for a single token that looks like an internal code.
pub fn is_internal_code(token: &str) -> bool {
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    if digits >= 8 && token.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    let letters = token.chars().filter(|c| c.is_ascii_alphabetic()).count();
    let uppercase = token
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .all(|c| c.is_ascii_uppercase());
    token.chars().count() >= 6
        && letters > 0
        && digits >= 3
        && uppercase
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_tokenize_splits_on_separators() {
        let tokens = tokenize("Steel Bottle, 500ml - Black/Grey (2-pack)");
        assert_eq!(
            tokens,
            vec!["Steel", "Bottle", "500ml", "Black", "Grey", "pack"]
        );
    }

    #[test]
    fn test_tokenize_drops_one_char_fragments() {
        let tokens = tokenize("3 x Mug");
        assert_eq!(tokens, vec!["Mug"]);
    }

    #[test]
    fn test_is_numeric_token() {
        assert!(is_numeric_token("250"));
        assert!(is_numeric_token("3.5"));
        assert!(!is_numeric_token("500ml"));
        assert!(!is_numeric_token("steel"));
        assert!(!is_numeric_token(".."));
    }

    #[test]
    fn test_meaningful_tokens_filters_stops_and_numbers() {
        let stop = stop_set(&["with", "set"]);
        let tokens = tokenize("Bottle Set with 12 Glasses");
        assert_eq!(meaningful_tokens(&tokens, &stop), vec!["bottle", "glasses"]);
    }

    #[test]
    fn test_duplicate_words_first_occurrence_order() {
        let meaningful = vec![
            "bottle".to_string(),
            "steel".to_string(),
            "bottle".to_string(),
            "steel".to_string(),
            "bottle".to_string(),
        ];
        assert_eq!(duplicate_words(&meaningful), vec!["bottle", "steel"]);
    }

    #[test]
    fn test_internal_code_detection() {
        let tokens = vec![
            "8680001234567".to_string(), // barcode
            "TYB4521X".to_string(),      // SKU-style code
            "Bottle".to_string(),
            "500ml".to_string(), // dimension, not a code
        ];
        assert_eq!(
            internal_code_tokens(&tokens),
            vec!["8680001234567", "TYB4521X"]
        );
    }
}
