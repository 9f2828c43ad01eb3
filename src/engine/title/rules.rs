//! The title rubric as a declarative rule table.
//!
//! Each rule is independent: it sees the shared [`TitleContext`], returns a
//! capped sub-score plus any diagnostics, and knows nothing about the other
//! rules. The scorer sums the table generically.

use crate::config::RubricConfig;
use crate::engine::title::keywords::KeywordAnalysis;
use crate::engine::title::tokens::{duplicate_words, internal_code_tokens};
use crate::engine::title::{Issue, Severity};
use std::collections::HashSet;

/// Everything a rule may inspect.
pub struct TitleContext<'a> {
    pub title: &'a str,
    pub brand: Option<&'a str>,
    pub category_name: &'a str,
    /// Tokens in original casing.
    pub raw_tokens: &'a [String],
    /// All tokens lowercased.
    pub lower_tokens: &'a [String],
    /// Lowercased tokens minus stop words and bare numbers.
    pub meaningful: &'a [String],
    pub keywords: &'a KeywordAnalysis,
    pub rubric: &'a RubricConfig,
}

/// What one rule contributes.
pub struct RuleOutcome {
    pub score: u32,
    pub issues: Vec<Issue>,
    pub tips: Vec<String>,
}

impl RuleOutcome {
    fn clean(score: u32) -> Self {
        RuleOutcome {
            score,
            issues: Vec::new(),
            tips: Vec::new(),
        }
    }

    fn with_tip(score: u32, tip: impl Into<String>) -> Self {
        RuleOutcome {
            score,
            issues: Vec::new(),
            tips: vec![tip.into()],
        }
    }

    fn with_issue(score: u32, severity: Severity, text: impl Into<String>) -> Self {
        RuleOutcome {
            score,
            issues: vec![Issue {
                severity,
                text: text.into(),
            }],
            tips: Vec::new(),
        }
    }
}

/// One row of the rubric table.
pub struct ScoringRule {
    pub name: &'static str,
    pub max: u32,
    pub evaluate: fn(&TitleContext) -> RuleOutcome,
}

/// The rubric, in reporting order. Maxima sum to 100.
pub const RULES: &[ScoringRule] = &[
    ScoringRule {
        name: "length_band",
        max: 15,
        evaluate: length_band,
    },
    ScoringRule {
        name: "brand_mention",
        max: 3,
        evaluate: brand_mention,
    },
    ScoringRule {
        name: "category_mention",
        max: 3,
        evaluate: category_mention,
    },
    ScoringRule {
        name: "lexical_diversity",
        max: 15,
        evaluate: lexical_diversity,
    },
    ScoringRule {
        name: "keyword_coverage",
        max: 20,
        evaluate: keyword_coverage,
    },
    ScoringRule {
        name: "descriptive_attributes",
        max: 9,
        evaluate: descriptive_attributes,
    },
    ScoringRule {
        name: "quantity_markers",
        max: 10,
        evaluate: quantity_markers,
    },
    ScoringRule {
        name: "formatting",
        max: 10,
        evaluate: formatting,
    },
    ScoringRule {
        name: "duplicate_tokens",
        max: 10,
        evaluate: duplicate_tokens,
    },
    ScoringRule {
        name: "internal_codes",
        max: 5,
        evaluate: internal_codes,
    },
];

fn length_band(ctx: &TitleContext) -> RuleOutcome {
    let len = ctx.title.chars().count();
    let rubric = ctx.rubric;
    if len < rubric.absolute_min_len {
        RuleOutcome::with_issue(
            0,
            Severity::Warning,
            format!(
                "title is only {} characters; aim for {}-{}",
                len, rubric.ideal_min_len, rubric.ideal_max_len
            ),
        )
    } else if len < rubric.ideal_min_len {
        RuleOutcome::with_issue(
            7,
            Severity::Warning,
            format!(
                "title is short ({} characters; {} or more recommended)",
                len, rubric.ideal_min_len
            ),
        )
    } else if len > rubric.ideal_max_len {
        RuleOutcome::with_issue(
            7,
            Severity::Warning,
            format!(
                "title is long ({} characters; {} or fewer recommended)",
                len, rubric.ideal_max_len
            ),
        )
    } else {
        RuleOutcome::clean(15)
    }
}

fn brand_mention(ctx: &TitleContext) -> RuleOutcome {
    match ctx.brand {
        Some(brand) if !brand.trim().is_empty() => {
            if ctx.title.to_lowercase().contains(&brand.to_lowercase()) {
                RuleOutcome::clean(3)
            } else {
                RuleOutcome::with_tip(0, format!("include the brand name (\"{}\")", brand))
            }
        }
        // Nothing to mention; the rule cannot be violated.
        _ => RuleOutcome::clean(3),
    }
}

fn category_mention(ctx: &TitleContext) -> RuleOutcome {
    let category = ctx.category_name.trim();
    if category.is_empty() {
        return RuleOutcome::clean(3);
    }
    if ctx.title.to_lowercase().contains(&category.to_lowercase()) {
        RuleOutcome::clean(3)
    } else {
        RuleOutcome::with_tip(0, format!("include the category name (\"{}\")", category))
    }
}

fn lexical_diversity(ctx: &TitleContext) -> RuleOutcome {
    let unique: HashSet<&str> = ctx.meaningful.iter().map(|s| s.as_str()).collect();
    match unique.len() {
        n if n >= 8 => RuleOutcome::clean(15),
        n if n >= 5 => RuleOutcome::with_tip(10, "add a few more descriptive words"),
        _ => RuleOutcome::with_tip(0, "add more descriptive words"),
    }
}

fn keyword_coverage(ctx: &TitleContext) -> RuleOutcome {
    let popular = &ctx.keywords.popular;
    if popular.is_empty() {
        // No corpus, no signal.
        return RuleOutcome::clean(0);
    }
    let top = popular.len().min(ctx.rubric.coverage_keyword_limit);
    let matched = popular[..top].iter().filter(|k| k.in_title).count();
    // round(20 * matched / top), half up
    let score = ((40 * matched + top) / (2 * top)) as u32;
    if matched == top {
        RuleOutcome::clean(score)
    } else {
        let examples: Vec<&str> = popular[..top]
            .iter()
            .filter(|k| !k.in_title)
            .take(3)
            .map(|k| k.word.as_str())
            .collect();
        RuleOutcome::with_tip(
            score,
            format!(
                "work popular category keywords into the title (e.g. {})",
                examples.join(", ")
            ),
        )
    }
}

fn descriptive_attributes(ctx: &TitleContext) -> RuleOutcome {
    let token_set: HashSet<&str> = ctx.lower_tokens.iter().map(|s| s.as_str()).collect();
    let groups: [(&[String], &str); 3] = [
        (&ctx.rubric.color_terms, "color"),
        (&ctx.rubric.material_terms, "material"),
        (&ctx.rubric.usage_terms, "usage context (e.g. kitchen, travel)"),
    ];

    let mut score = 0;
    let mut tips = Vec::new();
    for (terms, what) in groups {
        if terms.iter().any(|t| token_set.contains(t.as_str())) {
            score += 3;
        } else {
            tips.push(format!("mention a {}", what));
        }
    }
    RuleOutcome {
        score,
        issues: Vec::new(),
        tips,
    }
}

fn quantity_markers(ctx: &TitleContext) -> RuleOutcome {
    let has_count = has_numeric_unit(ctx.title, &ctx.rubric.count_units);
    let has_dimension = has_numeric_unit(ctx.title, &ctx.rubric.dimension_units);
    match (has_count, has_dimension) {
        (true, true) => RuleOutcome::clean(10),
        (true, false) => RuleOutcome::with_tip(5, "add a size or dimension (e.g. \"250 ml\")"),
        (false, true) => RuleOutcome::with_tip(5, "add a piece count (e.g. \"3 pcs\")"),
        (false, false) => {
            RuleOutcome::with_tip(0, "add quantity or size details (e.g. \"3 pcs\", \"250 ml\")")
        }
    }
}

/// True when a number is immediately followed (spaces allowed) by one of the
/// given unit words, e.g. "3 pcs" or "500ml".
fn has_numeric_unit(title: &str, units: &[String]) -> bool {
    let chars: Vec<char> = title.to_lowercase().chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.' || chars[i] == ',')
            {
                i += 1;
            }
            let mut j = i;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            let start = j;
            while j < chars.len() && chars[j].is_alphabetic() {
                j += 1;
            }
            if j > start {
                let word: String = chars[start..j].iter().collect();
                if units.iter().any(|u| *u == word) {
                    return true;
                }
            }
            i = j.max(i);
        } else {
            i += 1;
        }
    }
    false
}

fn formatting(ctx: &TitleContext) -> RuleOutcome {
    let mut score: i32 = 10;
    let mut issues = Vec::new();

    let forbidden: Vec<char> = ctx
        .title
        .chars()
        .filter(|c| ctx.rubric.forbidden_chars.contains(c))
        .collect();
    if !forbidden.is_empty() {
        score -= 4;
        issues.push(Issue {
            severity: Severity::Error,
            text: format!(
                "remove special characters from the title: {}",
                forbidden
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
        });
    }

    let shouting = ctx
        .raw_tokens
        .iter()
        .filter(|t| {
            t.chars().count() >= 4 && t.chars().all(|c| c.is_alphabetic() && c.is_uppercase())
        })
        .count();
    if shouting >= 2 {
        score -= 3;
        issues.push(Issue {
            severity: Severity::Warning,
            text: "avoid writing whole words in capitals".to_string(),
        });
    }

    if has_punctuation_run(ctx.title) {
        score -= 3;
        issues.push(Issue {
            severity: Severity::Warning,
            text: "avoid repeated punctuation".to_string(),
        });
    }

    RuleOutcome {
        score: score.max(0) as u32,
        issues,
        tips: Vec::new(),
    }
}

fn has_punctuation_run(title: &str) -> bool {
    const PUNCTUATION: [char; 9] = ['!', '?', '.', ',', ';', ':', '-', '_', '*'];
    let mut run = 0;
    for c in title.chars() {
        if PUNCTUATION.contains(&c) {
            run += 1;
            if run >= 2 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

fn duplicate_tokens(ctx: &TitleContext) -> RuleOutcome {
    let duplicates = duplicate_words(ctx.meaningful);
    if duplicates.is_empty() {
        RuleOutcome::clean(10)
    } else {
        RuleOutcome::with_issue(
            0,
            Severity::Warning,
            format!("repeated words: {}", duplicates.join(", ")),
        )
    }
}

fn internal_codes(ctx: &TitleContext) -> RuleOutcome {
    let codes = internal_code_tokens(ctx.raw_tokens);
    if codes.is_empty() {
        RuleOutcome::clean(5)
    } else {
        RuleOutcome::with_issue(
            0,
            Severity::Warning,
            format!("internal product codes in the title: {}", codes.join(", ")),
        )
    }
}
