//! Keyword mining over the competitor title corpus.

use crate::config::RubricConfig;
use crate::engine::title::tokens::{is_numeric_token, tokenize};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One corpus keyword with its usage statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordStat {
    pub word: String,
    /// Total occurrences across the corpus.
    pub count: usize,
    /// Occurrences relative to the number of competitor titles, whole
    /// percent. Can exceed 100 when a word repeats within titles.
    pub usage_pct: u32,
    /// Whether the candidate title already contains the word.
    pub in_title: bool,
}

/// Popular and missing keywords for one candidate title against its corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeywordAnalysis {
    /// Top corpus keywords by frequency, most frequent first.
    pub popular: Vec<KeywordStat>,
    /// Popular keywords absent from the candidate whose usage clears the
    /// configured threshold. Direct input to the synthesizer.
    pub missing: Vec<KeywordStat>,
}

/// Mine the competitor corpus and relate it to the candidate title's tokens.
///
/// `title_words` must already be lowercased (any tokens, not only meaningful
/// ones: a stop word in the title still counts as present).
pub fn analyze_keywords(
    rubric: &RubricConfig,
    title_words: &HashSet<String>,
    competitor_titles: &[String],
) -> KeywordAnalysis {
    let stop_words: HashSet<String> = rubric.stop_words.iter().cloned().collect();

    let mut frequency: HashMap<String, usize> = HashMap::new();
    for title in competitor_titles {
        for token in tokenize(title) {
            let word = token.to_lowercase();
            if !stop_words.contains(&word) && !is_numeric_token(&word) {
                *frequency.entry(word).or_insert(0) += 1;
            }
        }
    }

    // Frequency descending, then alphabetical, so the ranking is stable.
    let mut ranked: Vec<(String, usize)> = frequency.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let corpus_size = competitor_titles.len();
    let popular: Vec<KeywordStat> = ranked
        .into_iter()
        .take(rubric.popular_keyword_limit)
        .map(|(word, count)| {
            let usage_pct = if corpus_size > 0 {
                ((200 * count + corpus_size) / (2 * corpus_size)) as u32
            } else {
                0
            };
            let in_title = title_words.contains(&word);
            KeywordStat {
                word,
                count,
                usage_pct,
                in_title,
            }
        })
        .collect();

    let missing: Vec<KeywordStat> = popular
        .iter()
        .filter(|k| !k.in_title && k.usage_pct >= rubric.missing_usage_threshold_pct)
        .take(rubric.missing_keyword_limit)
        .cloned()
        .collect();

    KeywordAnalysis { popular, missing }
}
