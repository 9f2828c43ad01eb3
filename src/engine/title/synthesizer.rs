//! Deterministic replacement-title synthesis.
//!
//! Not a text generator: a fixed sequence of transforms over the candidate
//! title, driven by the scorer's keyword findings. Applying it to its own
//! output changes nothing once no relevant keywords are missing.

use crate::config::RubricConfig;
use crate::engine::title::keywords::KeywordStat;
use crate::engine::title::tokens::{is_internal_code, is_numeric_token, tokenize};
use std::collections::HashSet;

/// Build a suggested title from the candidate.
///
/// In order: strip the brand (the marketplace prepends it to listings
/// anyway), drop internal code tokens, collapse duplicate meaningful tokens
/// keeping the first occurrence, append the highest-value missing keywords,
/// and truncate on a word boundary at the rubric maximum.
pub fn synthesize_title(
    rubric: &RubricConfig,
    title: &str,
    brand: Option<&str>,
    missing: &[KeywordStat],
) -> String {
    let stop_words: HashSet<String> = rubric.stop_words.iter().cloned().collect();
    let brand_words: HashSet<String> = brand
        .map(|b| b.split_whitespace().map(|w| w.to_lowercase()).collect())
        .unwrap_or_default();

    let mut kept: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for token in tokenize(title) {
        let lower = token.to_lowercase();
        if brand_words.contains(&lower) || is_internal_code(&token) {
            continue;
        }
        let meaningful = !stop_words.contains(&lower) && !is_numeric_token(&lower);
        if meaningful && !seen.insert(lower) {
            continue; // keep first occurrence only
        }
        kept.push(token);
    }

    let mut appended = 0;
    for keyword in missing {
        if appended == rubric.synthesizer_keyword_limit {
            break;
        }
        if keyword.usage_pct < rubric.synthesizer_usage_threshold_pct {
            continue;
        }
        if seen.contains(&keyword.word) {
            continue;
        }
        seen.insert(keyword.word.clone());
        kept.push(title_case(&keyword.word));
        appended += 1;
    }

    truncate_at_word_boundary(&kept, rubric.ideal_max_len)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join words with single spaces, stopping before the word that would push
/// the result past `max_len`. The first word is always kept whole.
fn truncate_at_word_boundary(words: &[String], max_len: usize) -> String {
    let mut result = String::new();
    let mut len = 0;
    for word in words {
        let word_len = word.chars().count();
        let candidate = if result.is_empty() {
            word_len
        } else {
            len + 1 + word_len
        };
        if candidate > max_len && !result.is_empty() {
            break;
        }
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
        len = candidate;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(word: &str, usage_pct: u32) -> KeywordStat {
        KeywordStat {
            word: word.to_string(),
            count: 1,
            usage_pct,
            in_title: false,
        }
    }

    #[test]
    fn test_strips_brand() {
        let rubric = RubricConfig::default();
        let result = synthesize_title(&rubric, "Acme Steel Water Bottle", Some("Acme"), &[]);
        assert_eq!(result, "Steel Water Bottle");
    }

    #[test]
    fn test_strips_internal_codes() {
        let rubric = RubricConfig::default();
        let result = synthesize_title(&rubric, "Steel Bottle TYB4521X 500ml", None, &[]);
        assert_eq!(result, "Steel Bottle 500ml");
    }

    #[test]
    fn test_collapses_duplicates_keeping_first() {
        let rubric = RubricConfig::default();
        let result = synthesize_title(&rubric, "Bottle Steel Bottle Lid Bottle", None, &[]);
        assert_eq!(result, "Bottle Steel Lid");
    }

    #[test]
    fn test_appends_high_value_missing_keywords() {
        let rubric = RubricConfig::default();
        let missing = vec![
            keyword("thermos", 60),
            keyword("flask", 25), // below the 30% append threshold
            keyword("insulated", 45),
        ];
        let result = synthesize_title(&rubric, "Steel Water Bottle 500ml", None, &missing);
        assert_eq!(result, "Steel Water Bottle 500ml Thermos Insulated");
    }

    #[test]
    fn test_append_limit() {
        let rubric = RubricConfig::default();
        let missing = vec![
            keyword("thermos", 60),
            keyword("insulated", 55),
            keyword("leakproof", 50),
            keyword("portable", 45),
        ];
        let result = synthesize_title(&rubric, "Steel Water Bottle", None, &missing);
        assert_eq!(
            result,
            "Steel Water Bottle Thermos Insulated Leakproof"
        );
    }

    #[test]
    fn test_truncates_on_word_boundary() {
        let rubric = RubricConfig::default();
        let long_title = "Insulated Stainless Steel Water Bottle Leakproof Thermal Flask \
                          Portable Travel Camping Hiking Gym Office Double Walled Vacuum \
                          Sealed Drinkware Bottle Holder Accessory";
        let result = synthesize_title(&rubric, long_title, None, &[]);
        assert!(result.chars().count() <= rubric.ideal_max_len);
        // No trailing fragment: the result ends on a whole input word.
        assert!(!result.ends_with(' '));
        let last = result.split_whitespace().last().unwrap();
        assert!(long_title.contains(last));
    }

    #[test]
    fn test_idempotent_when_nothing_left_to_fix() {
        let rubric = RubricConfig::default();
        let missing = vec![keyword("thermos", 60)];
        let first = synthesize_title(&rubric, "Acme Steel Bottle Steel 500ml", Some("Acme"), &missing);
        // Second pass: the keyword is now present, brand and duplicates gone.
        let second = synthesize_title(&rubric, &first, Some("Acme"), &missing);
        assert_eq!(first, second);
        assert_eq!(first, "Steel Bottle 500ml Thermos");
    }
}
