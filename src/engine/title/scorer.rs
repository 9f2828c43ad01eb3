//! Runs the rubric table over a candidate title and assembles the result.

use crate::config::RubricConfig;
use crate::engine::title::keywords::{analyze_keywords, KeywordStat};
use crate::engine::title::rules::{TitleContext, RULES};
use crate::engine::title::synthesizer::synthesize_title;
use crate::engine::title::tokens::{duplicate_words, meaningful_tokens, tokenize};
use crate::engine::title::{Issue, ScoreLabel};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One audited rubric row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub name: String,
    pub score: u32,
    pub max: u32,
}

/// Full scoring result for one candidate title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleScore {
    pub current_title: String,
    pub title_length: usize,
    pub word_count: usize,
    pub unique_word_count: usize,
    /// Clamped to [5, 100].
    pub score: u32,
    pub label: ScoreLabel,
    pub issues: Vec<Issue>,
    pub tips: Vec<String>,
    pub breakdown: Vec<BreakdownRow>,
    pub popular_keywords: Vec<KeywordStat>,
    pub missing_keywords: Vec<KeywordStat>,
    pub duplicate_words: Vec<String>,
    pub suggested_title: String,
    pub competitor_title_count: usize,
}

/// Score a candidate title against its competitor corpus.
pub fn score_title(
    rubric: &RubricConfig,
    title: &str,
    brand: Option<&str>,
    category_name: &str,
    competitor_titles: &[String],
) -> TitleScore {
    let raw_tokens = tokenize(title);
    let lower_tokens: Vec<String> = raw_tokens.iter().map(|t| t.to_lowercase()).collect();
    let stop_words: HashSet<String> = rubric.stop_words.iter().cloned().collect();
    let meaningful = meaningful_tokens(&raw_tokens, &stop_words);
    let title_words: HashSet<String> = lower_tokens.iter().cloned().collect();
    let keywords = analyze_keywords(rubric, &title_words, competitor_titles);

    let ctx = TitleContext {
        title,
        brand,
        category_name,
        raw_tokens: &raw_tokens,
        lower_tokens: &lower_tokens,
        meaningful: &meaningful,
        keywords: &keywords,
        rubric,
    };

    let mut total = 0;
    let mut breakdown = Vec::with_capacity(RULES.len());
    let mut issues = Vec::new();
    let mut tips = Vec::new();
    for rule in RULES {
        let mut outcome = (rule.evaluate)(&ctx);
        let score = outcome.score.min(rule.max);
        total += score;
        breakdown.push(BreakdownRow {
            name: rule.name.to_string(),
            score,
            max: rule.max,
        });
        issues.append(&mut outcome.issues);
        tips.append(&mut outcome.tips);
    }

    let score = total.clamp(5, 100);
    let unique_word_count = meaningful.iter().collect::<HashSet<_>>().len();
    let suggested_title = synthesize_title(rubric, title, brand, &keywords.missing);

    TitleScore {
        current_title: title.to_string(),
        title_length: title.chars().count(),
        word_count: raw_tokens.len(),
        unique_word_count,
        score,
        label: ScoreLabel::from_score(score),
        issues,
        tips,
        breakdown,
        popular_keywords: keywords.popular,
        missing_keywords: keywords.missing,
        duplicate_words: duplicate_words(&meaningful),
        suggested_title,
        competitor_title_count: competitor_titles.len(),
    }
}
