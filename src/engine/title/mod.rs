//! Title quality: rubric scoring and deterministic rewriting.
//!
//! This module provides:
//! - Tokenization and keyword mining over a competitor title corpus
//! - A table-driven scoring rubric of independent rules
//! - A deterministic synthesizer that proposes a replacement title

pub mod keywords;
pub mod rules;
pub mod scorer;
pub mod synthesizer;
pub mod tokens;

pub use keywords::{KeywordAnalysis, KeywordStat};
pub use scorer::{score_title, BreakdownRow, TitleScore};
pub use synthesizer::synthesize_title;

use serde::{Deserialize, Serialize};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed before the title is acceptable.
    Error,
    /// Hurts visibility but does not block listing.
    Warning,
}

/// A problem found in the candidate title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub text: String,
}

/// Presentational score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLabel {
    Excellent,
    Good,
    Fair,
    Weak,
    Critical,
}

impl ScoreLabel {
    pub fn from_score(score: u32) -> Self {
        match score {
            85.. => ScoreLabel::Excellent,
            70..=84 => ScoreLabel::Good,
            50..=69 => ScoreLabel::Fair,
            30..=49 => ScoreLabel::Weak,
            _ => ScoreLabel::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_label_bands() {
        assert_eq!(ScoreLabel::from_score(100), ScoreLabel::Excellent);
        assert_eq!(ScoreLabel::from_score(85), ScoreLabel::Excellent);
        assert_eq!(ScoreLabel::from_score(84), ScoreLabel::Good);
        assert_eq!(ScoreLabel::from_score(70), ScoreLabel::Good);
        assert_eq!(ScoreLabel::from_score(50), ScoreLabel::Fair);
        assert_eq!(ScoreLabel::from_score(30), ScoreLabel::Weak);
        assert_eq!(ScoreLabel::from_score(29), ScoreLabel::Critical);
        assert_eq!(ScoreLabel::from_score(5), ScoreLabel::Critical);
    }
}
