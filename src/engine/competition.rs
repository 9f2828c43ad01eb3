//! Competitive analysis over listings from the same category: descriptive
//! price statistics, percentile positioning, discount prevalence, nearest
//! competitors, a rule-based price recommendation, quartile segments, and the
//! shipping-tier-boundary detector.

use crate::config::EngineConfig;
use crate::domain::{CompetitorListing, Decimal};
use crate::engine::deductions::DeductionModel;
use crate::engine::solver::PriceSolver;
use serde::{Deserialize, Serialize};

/// Descriptive statistics over the filtered competitor sale prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStatistics {
    pub avg: Decimal,
    pub median: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    pub count: usize,
    /// Population standard deviation.
    pub std_dev: Decimal,
}

/// Quartile band the subject price falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionLabel {
    CheapestQuartile,
    BelowAverage,
    AboveAverage,
    MostExpensiveQuartile,
}

/// Percentile rank of the subject price within the competitor set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePosition {
    /// Percent of competitors strictly cheaper, 0-100.
    pub percentile: u32,
    pub cheaper_count: usize,
    pub expensive_count: usize,
    pub label: PositionLabel,
}

/// How widespread discounting is across the competitor set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountPrevalence {
    pub discounted_count: usize,
    /// Share of competitors currently discounted, whole percent.
    pub discounted_share_pct: u32,
    /// Average discount among the discounted, percent to one decimal.
    pub avg_discount_pct: Decimal,
}

/// A competitor annotated with its distance from the subject price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCompetitor {
    pub title: String,
    pub brand: String,
    pub sale_price: Decimal,
    pub list_price: Decimal,
    /// Signed: positive when the competitor is more expensive.
    pub price_diff: Decimal,
    /// Signed whole-percent difference relative to the subject price.
    pub price_diff_pct: Decimal,
    pub has_discount: bool,
    pub discount_pct: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    LowerPrice,
    RaisePrice,
    WellPositioned,
}

/// The rule-based pricing verdict against the category mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecommendation {
    pub kind: RecommendationKind,
    pub suggested_price: Decimal,
    /// Signed whole-percent deviation of the subject from the mean.
    pub deviation_pct: Decimal,
    pub rationale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentLabel {
    Cheap,
    MidLow,
    MidHigh,
    Expensive,
}

/// One quartile-based price segment of the competitor set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSegment {
    pub label: SegmentLabel,
    pub lower: Decimal,
    pub upper: Decimal,
    pub count: usize,
    pub contains_subject: bool,
}

/// A cheaper shipping tier reachable by a small price cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierOpportunity {
    /// Highest price of the cheaper tier, e.g. 149.99.
    pub breakpoint_price: Decimal,
    pub current_shipping: Decimal,
    pub shipping_at_breakpoint: Decimal,
    pub shipping_saving: Decimal,
    /// Net profit at the breakpoint when the cost is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_at_breakpoint: Option<Decimal>,
}

/// Everything the analyzer derives when competitor data exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub stats: PriceStatistics,
    pub position: PricePosition,
    pub discounts: DiscountPrevalence,
    pub nearest: Vec<RankedCompetitor>,
    pub recommendation: PriceRecommendation,
    pub segments: Vec<PriceSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_opportunity: Option<TierOpportunity>,
}

/// Analyzer output: either a market view or an explicit no-data result.
///
/// The no-data arm still carries a break-even price whenever the cost is
/// known, since break-even never depends on competitors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "has_data", rename_all = "snake_case")]
pub enum CompetitiveAnalysis {
    #[serde(rename = "false")]
    NoData {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        break_even: Option<Decimal>,
    },
    #[serde(rename = "true")]
    Market(MarketAnalysis),
}

impl CompetitiveAnalysis {
    pub fn has_data(&self) -> bool {
        matches!(self, CompetitiveAnalysis::Market(_))
    }
}

/// Integer percent with half-up rounding.
fn percent_of(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as u32
}

fn position_label(percentile: u32) -> PositionLabel {
    match percentile {
        0..=25 => PositionLabel::CheapestQuartile,
        26..=50 => PositionLabel::BelowAverage,
        51..=75 => PositionLabel::AboveAverage,
        _ => PositionLabel::MostExpensiveQuartile,
    }
}

/// Analyze the subject price against its category competitors.
///
/// `cost_price` and `commission_rate` are optional context: they only feed
/// the break-even figure and the tier-opportunity profit; the rate falls back
/// to the configured default.
pub fn analyze_competitors(
    config: &EngineConfig,
    subject_price: Decimal,
    category_name: &str,
    competitors: &[CompetitorListing],
    cost_price: Option<Decimal>,
    commission_rate: Option<Decimal>,
) -> CompetitiveAnalysis {
    let rate = commission_rate.unwrap_or(config.default_commission_rate);

    // Listings with a non-positive sale price carry no signal.
    let valid: Vec<&CompetitorListing> = competitors
        .iter()
        .filter(|c| c.sale_price.is_positive())
        .collect();

    if valid.is_empty() {
        let break_even = cost_price
            .filter(|c| c.is_positive())
            .map(|cost| PriceSolver::new(config).min_price(cost, rate).price);
        return CompetitiveAnalysis::NoData {
            message: format!(
                "no comparable listings found in category \"{}\"",
                category_name
            ),
            break_even,
        };
    }

    let mut prices: Vec<Decimal> = valid.iter().map(|c| c.sale_price).collect();
    prices.sort();

    let stats = price_statistics(&prices);
    let position = price_position(&prices, subject_price);
    let discounts = discount_prevalence(&valid);
    let nearest = nearest_competitors(config, &valid, subject_price);
    let recommendation = recommend(config, subject_price, &stats);
    let segments = segment(&prices, &stats, subject_price);
    let tier_opportunity = find_tier_opportunity(config, subject_price, cost_price, rate);

    CompetitiveAnalysis::Market(MarketAnalysis {
        stats,
        position,
        discounts,
        nearest,
        recommendation,
        segments,
        tier_opportunity,
    })
}

fn price_statistics(sorted: &[Decimal]) -> PriceStatistics {
    let count = sorted.len();
    let n = Decimal::from_int(count as i64);
    let sum = sorted
        .iter()
        .fold(Decimal::zero(), |acc, p| acc + *p);
    let mean = sum / n;

    let variance = sorted
        .iter()
        .fold(Decimal::zero(), |acc, p| {
            let diff = *p - mean;
            acc + diff * diff
        })
        / n;

    PriceStatistics {
        avg: mean.round_2dp(),
        median: sorted[count / 2].round_2dp(),
        min: sorted[0],
        max: sorted[count - 1],
        count,
        std_dev: variance.sqrt().round_2dp(),
    }
}

fn price_position(sorted: &[Decimal], subject_price: Decimal) -> PricePosition {
    let count = sorted.len();
    let cheaper_count = sorted.iter().filter(|p| **p < subject_price).count();
    let percentile = percent_of(cheaper_count, count);
    PricePosition {
        percentile,
        cheaper_count,
        expensive_count: count - cheaper_count,
        label: position_label(percentile),
    }
}

fn discount_prevalence(valid: &[&CompetitorListing]) -> DiscountPrevalence {
    let discounted: Vec<Decimal> = valid
        .iter()
        .filter(|c| c.has_discount())
        .map(|c| c.discount_pct())
        .collect();
    let avg_discount_pct = if discounted.is_empty() {
        Decimal::zero()
    } else {
        let sum = discounted
            .iter()
            .fold(Decimal::zero(), |acc, p| acc + *p);
        (sum / Decimal::from_int(discounted.len() as i64)).round_1dp()
    };
    DiscountPrevalence {
        discounted_count: discounted.len(),
        discounted_share_pct: percent_of(discounted.len(), valid.len()),
        avg_discount_pct,
    }
}

fn nearest_competitors(
    config: &EngineConfig,
    valid: &[&CompetitorListing],
    subject_price: Decimal,
) -> Vec<RankedCompetitor> {
    let mut ranked: Vec<RankedCompetitor> = valid
        .iter()
        .map(|c| {
            let price_diff = c.sale_price - subject_price;
            let price_diff_pct = if subject_price.is_positive() {
                (price_diff / subject_price * Decimal::hundred()).round_whole()
            } else {
                Decimal::zero()
            };
            RankedCompetitor {
                title: c.title.clone(),
                brand: c.brand.clone(),
                sale_price: c.sale_price,
                list_price: c.list_price,
                price_diff,
                price_diff_pct,
                has_discount: c.has_discount(),
                discount_pct: c.discount_pct(),
            }
        })
        .collect();
    ranked.sort_by(|a, b| a.price_diff.abs().cmp(&b.price_diff.abs()));
    ranked.truncate(config.nearest_competitor_limit);
    ranked
}

fn recommend(
    config: &EngineConfig,
    subject_price: Decimal,
    stats: &PriceStatistics,
) -> PriceRecommendation {
    let avg = stats.avg;
    let deviation_pct = ((subject_price - avg) / avg * Decimal::hundred()).round_whole();
    let threshold = config.mean_deviation_threshold_pct;

    if deviation_pct > threshold {
        let low = (avg * Decimal::from_cents(105)).round_2dp();
        let high = (avg * Decimal::from_cents(115)).round_2dp();
        PriceRecommendation {
            kind: RecommendationKind::LowerPrice,
            suggested_price: (avg * Decimal::from_cents(110)).round_2dp(),
            deviation_pct,
            rationale: format!(
                "price is {}% above the category average of {}; moving into the {} - {} band would restore competitiveness",
                deviation_pct, avg, low, high
            ),
        }
    } else if deviation_pct < -threshold {
        let low = (avg * Decimal::from_cents(90)).round_2dp();
        PriceRecommendation {
            kind: RecommendationKind::RaisePrice,
            suggested_price: (avg * Decimal::from_cents(95)).round_2dp(),
            deviation_pct,
            rationale: format!(
                "price is {}% below the category average of {}; the {} - {} band would lift margin without losing position",
                deviation_pct.abs(), avg, low, avg
            ),
        }
    } else {
        PriceRecommendation {
            kind: RecommendationKind::WellPositioned,
            suggested_price: subject_price,
            deviation_pct,
            rationale: format!(
                "price is within {}% of the category average of {} across {} competitors",
                threshold, avg, stats.count
            ),
        }
    }
}

fn segment(sorted: &[Decimal], stats: &PriceStatistics, subject_price: Decimal) -> Vec<PriceSegment> {
    let n = sorted.len();
    let q1 = sorted[n / 4];
    let q2 = sorted[n / 2];
    let q3 = sorted[3 * n / 4];

    let bands: [(SegmentLabel, Decimal, Decimal); 4] = [
        (SegmentLabel::Cheap, stats.min, q1),
        (SegmentLabel::MidLow, q1, q2),
        (SegmentLabel::MidHigh, q2, q3),
        (SegmentLabel::Expensive, q3, stats.max),
    ];

    let band_index = |price: Decimal| -> usize {
        if price < q1 {
            0
        } else if price < q2 {
            1
        } else if price < q3 {
            2
        } else {
            3
        }
    };

    let mut counts = [0usize; 4];
    for price in sorted {
        counts[band_index(*price)] += 1;
    }
    let subject_band = band_index(subject_price);

    bands
        .iter()
        .enumerate()
        .map(|(i, (label, lower, upper))| PriceSegment {
            label: *label,
            lower: *lower,
            upper: *upper,
            count: counts[i],
            contains_subject: i == subject_band,
        })
        .collect()
}

/// Shared with the strategy builder: a price just above a tier start can be
/// cut to the breakpoint for a shipping saving.
pub(crate) fn find_tier_opportunity(
    config: &EngineConfig,
    subject_price: Decimal,
    cost_price: Option<Decimal>,
    rate: Decimal,
) -> Option<TierOpportunity> {
    let model = DeductionModel::new(&config.fees);
    let cent = Decimal::from_cents(1);

    for tier in config.fees.tiers().iter().skip(1) {
        let boundary = tier.min_price;
        if subject_price >= boundary && subject_price < boundary + config.tier_opportunity_margin {
            let breakpoint_price = boundary - cent;
            let current_shipping = model.shipping_cost(subject_price);
            let shipping_at_breakpoint = model.shipping_cost(breakpoint_price);
            return Some(TierOpportunity {
                breakpoint_price,
                current_shipping,
                shipping_at_breakpoint,
                shipping_saving: current_shipping - shipping_at_breakpoint,
                profit_at_breakpoint: cost_price
                    .map(|cost| model.net_profit_at(breakpoint_price, cost, rate)),
            });
        }
    }
    None
}
