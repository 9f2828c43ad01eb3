//! Engine configuration: the fee schedule and the tunable business constants.
//!
//! The margin table, recommendation thresholds and rubric word lists are
//! deliberately configuration rather than hard-coded constants; the defaults
//! reproduce the marketplace's published 2026 numbers.

use crate::domain::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shipping price band with a flat cost.
///
/// `max_price` is `None` only on the last, unbounded tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingTier {
    pub min_price: Decimal,
    pub max_price: Option<Decimal>,
    pub cost: Decimal,
}

impl ShippingTier {
    pub fn new(min_price: Decimal, max_price: Option<Decimal>, cost: Decimal) -> Self {
        ShippingTier {
            min_price,
            max_price,
            cost,
        }
    }

    /// True when `price` falls inside this tier's band.
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min_price && self.max_price.map_or(true, |max| price <= max)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("fee schedule must contain at least one shipping tier")]
    EmptyTiers,
    #[error("the first shipping tier must start at price 0")]
    NonZeroStart,
    #[error("shipping tier {0} leaves a gap or overlap before the next tier")]
    BrokenPartition(usize),
    #[error("the last shipping tier must have no upper bound")]
    BoundedTail,
    #[error("negative amount in fee schedule: {0}")]
    NegativeAmount(String),
}

/// Immutable per-sale fee configuration: the ordered shipping tiers plus the
/// fixed platform fee. Loaded once, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    tiers: Vec<ShippingTier>,
    pub platform_fee: Decimal,
}

impl FeeSchedule {
    /// Build a schedule, validating that the tiers form an ordered, gap-free
    /// partition of `[0, infinity)` at cent granularity.
    pub fn new(tiers: Vec<ShippingTier>, platform_fee: Decimal) -> Result<Self, ConfigError> {
        if tiers.is_empty() {
            return Err(ConfigError::EmptyTiers);
        }
        if !tiers[0].min_price.is_zero() {
            return Err(ConfigError::NonZeroStart);
        }
        if platform_fee.is_negative() {
            return Err(ConfigError::NegativeAmount(platform_fee.to_string()));
        }

        let cent = Decimal::from_cents(1);
        for (i, tier) in tiers.iter().enumerate() {
            if tier.cost.is_negative() {
                return Err(ConfigError::NegativeAmount(tier.cost.to_string()));
            }
            match tier.max_price {
                Some(max) => {
                    if max <= tier.min_price {
                        return Err(ConfigError::BrokenPartition(i));
                    }
                    // The next tier must start exactly one cent above this one.
                    match tiers.get(i + 1) {
                        Some(next) if next.min_price == max + cent => {}
                        Some(_) => return Err(ConfigError::BrokenPartition(i)),
                        None => return Err(ConfigError::BoundedTail),
                    }
                }
                None => {
                    if i + 1 != tiers.len() {
                        return Err(ConfigError::BrokenPartition(i));
                    }
                }
            }
        }

        Ok(FeeSchedule {
            tiers,
            platform_fee,
        })
    }

    /// The marketplace's published 2026 schedule:
    ///
    /// |   0 - 149.99 |  58.50 |
    /// | 150 - 299.99 |  95.50 |
    /// | 300 - 399.99 | 110.00 |
    /// | 400+         | 130.00 |
    ///
    /// plus a flat 13.80 platform fee per sale.
    pub fn standard() -> Self {
        let tiers = vec![
            ShippingTier::new(
                Decimal::zero(),
                Some(Decimal::from_cents(149_99)),
                Decimal::from_cents(58_50),
            ),
            ShippingTier::new(
                Decimal::from_int(150),
                Some(Decimal::from_cents(299_99)),
                Decimal::from_cents(95_50),
            ),
            ShippingTier::new(
                Decimal::from_int(300),
                Some(Decimal::from_cents(399_99)),
                Decimal::from_int(110),
            ),
            ShippingTier::new(Decimal::from_int(400), None, Decimal::from_int(130)),
        ];
        FeeSchedule::new(tiers, Decimal::from_cents(13_80))
            .expect("standard schedule is a valid partition")
    }

    pub fn tiers(&self) -> &[ShippingTier] {
        &self.tiers
    }
}

/// One row of the cost-banded target-margin table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginBand {
    /// Upper cost bound (inclusive); `None` on the open-ended last band.
    pub max_cost: Option<Decimal>,
    /// Target margin as a fraction of cost, e.g. 0.38.
    pub margin: Decimal,
}

impl MarginBand {
    pub fn new(max_cost: Option<Decimal>, margin: Decimal) -> Self {
        MarginBand { max_cost, margin }
    }
}

/// Word lists and thresholds for the title rubric. Table-driven so individual
/// rules stay free of embedded business constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricConfig {
    /// Below this character count a title scores zero on length.
    pub absolute_min_len: usize,
    /// Ideal character window, inclusive.
    pub ideal_min_len: usize,
    pub ideal_max_len: usize,
    pub stop_words: Vec<String>,
    pub color_terms: Vec<String>,
    pub material_terms: Vec<String>,
    pub usage_terms: Vec<String>,
    /// Units that mark a piece count, e.g. "3 pcs".
    pub count_units: Vec<String>,
    /// Units that mark a physical dimension, e.g. "250 ml".
    pub dimension_units: Vec<String>,
    pub forbidden_chars: Vec<char>,
    /// How many corpus keywords to surface.
    pub popular_keyword_limit: usize,
    /// How many of the top keywords count toward coverage.
    pub coverage_keyword_limit: usize,
    /// Minimum corpus usage (percent) for a missing keyword to be reported.
    pub missing_usage_threshold_pct: u32,
    pub missing_keyword_limit: usize,
    /// Minimum corpus usage (percent) for the synthesizer to append a keyword.
    pub synthesizer_usage_threshold_pct: u32,
    pub synthesizer_keyword_limit: usize,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for RubricConfig {
    fn default() -> Self {
        RubricConfig {
            absolute_min_len: 25,
            ideal_min_len: 40,
            ideal_max_len: 150,
            stop_words: words(&[
                "and", "with", "for", "the", "of", "a", "an", "in", "on", "to", "or", "by", "per",
                "new", "set", "pcs", "x",
            ]),
            color_terms: words(&[
                "black", "white", "red", "blue", "green", "grey", "gray", "beige", "brown",
                "pink", "purple", "yellow", "orange", "gold", "silver", "transparent",
            ]),
            material_terms: words(&[
                "steel", "stainless", "metal", "plastic", "wood", "wooden", "bamboo", "glass",
                "ceramic", "cotton", "leather", "silicone", "acrylic",
            ]),
            usage_terms: words(&[
                "kitchen", "bathroom", "bedroom", "office", "home", "outdoor", "garden", "car",
                "travel", "camping", "desk",
            ]),
            count_units: words(&["pcs", "pc", "piece", "pieces", "pack", "pair", "pairs", "set"]),
            dimension_units: words(&[
                "cm", "mm", "m", "ml", "l", "lt", "g", "gr", "kg", "inch", "oz",
            ]),
            forbidden_chars: vec!['!', '@', '#', '$', '%', '^', '&', '*', '{', '}', '|', '<', '>'],
            popular_keyword_limit: 20,
            coverage_keyword_limit: 10,
            missing_usage_threshold_pct: 20,
            missing_keyword_limit: 8,
            synthesizer_usage_threshold_pct: 30,
            synthesizer_keyword_limit: 3,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub fees: FeeSchedule,
    /// Applied when no commission observation exists for a product.
    pub default_commission_rate: Decimal,
    /// Cost-banded target margins for the recommended-price solver, checked
    /// in order; cost at or below `max_cost` selects the band.
    pub margin_bands: Vec<MarginBand>,
    /// Fallback margin when the cost is unknown or non-positive.
    pub fallback_margin: Decimal,
    /// Deviation from the competitor mean (percent) beyond which a price
    /// change is recommended.
    pub mean_deviation_threshold_pct: Decimal,
    /// How far above a tier breakpoint (currency units) a price still counts
    /// as a boundary opportunity.
    pub tier_opportunity_margin: Decimal,
    /// How many nearest competitors to report.
    pub nearest_competitor_limit: usize,
    pub rubric: RubricConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            fees: FeeSchedule::standard(),
            default_commission_rate: Decimal::from_int(20),
            margin_bands: vec![
                MarginBand::new(Some(Decimal::from_int(25)), Decimal::from_cents(50)),
                MarginBand::new(Some(Decimal::from_int(50)), Decimal::from_cents(38)),
                MarginBand::new(Some(Decimal::from_int(100)), Decimal::from_cents(30)),
                MarginBand::new(Some(Decimal::from_int(200)), Decimal::from_cents(25)),
                MarginBand::new(Some(Decimal::from_int(400)), Decimal::from_cents(22)),
                MarginBand::new(None, Decimal::from_cents(18)),
            ],
            fallback_margin: Decimal::from_cents(30),
            mean_deviation_threshold_pct: Decimal::from_int(25),
            tier_opportunity_margin: Decimal::from_int(10),
            nearest_competitor_limit: 10,
            rubric: RubricConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Target margin (fraction of cost) for a given cost price.
    pub fn ideal_margin(&self, cost_price: Decimal) -> Decimal {
        if !cost_price.is_positive() {
            return self.fallback_margin;
        }
        for band in &self.margin_bands {
            match band.max_cost {
                Some(max) if cost_price <= max => return band.margin,
                Some(_) => continue,
                None => return band.margin,
            }
        }
        self.fallback_margin
    }
}
