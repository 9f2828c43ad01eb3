//! Pricing strategy for one product: profit across every shipping tier,
//! sweet-spot prices at tier boundaries, a coupon plan for crossing down a
//! tier, and the solver-backed floor and target prices.

use crate::config::{EngineConfig, ShippingTier};
use crate::domain::Decimal;
use crate::engine::competition::{find_tier_opportunity, TierOpportunity};
use crate::engine::deductions::{DeductionBreakdown, DeductionModel, ProfitResult};
use crate::engine::solver::{PriceSolver, SolvedPrice};
use serde::{Deserialize, Serialize};

/// Where a sample price sits inside its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierPointKind {
    /// One cent below the tier start, i.e. the top of the previous tier.
    BelowStart,
    Start,
    Mid,
    End,
}

/// Profit sampled at one representative price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPricePoint {
    pub kind: TierPointKind,
    pub price: Decimal,
    pub shipping: Decimal,
    pub net_profit: Decimal,
}

/// One shipping tier with its sampled price points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierProfitRow {
    pub tier: ShippingTier,
    pub points: Vec<TierPricePoint>,
}

/// A tier-boundary price that is currently profitable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweetSpot {
    pub price: Decimal,
    pub net_profit: Decimal,
    pub shipping: Decimal,
}

/// Show a higher price, attach a coupon, land the checkout total exactly on
/// a cheaper shipping tier's breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouponPlan {
    pub display_price: Decimal,
    pub coupon_amount: Decimal,
    pub checkout_price: Decimal,
    pub profit_at_checkout: Decimal,
    pub shipping_saved: Decimal,
}

/// Complete strategy picture for one product with a known cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingStrategy {
    pub breakdown: DeductionBreakdown,
    pub current: ProfitResult,
    pub tier_rows: Vec<TierProfitRow>,
    pub sweet_spots: Vec<SweetSpot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<CouponPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_opportunity: Option<TierOpportunity>,
    pub min_price: SolvedPrice,
    pub recommended_price: SolvedPrice,
    /// The target margin behind `recommended_price`, percent of cost.
    pub target_margin_pct: Decimal,
}

/// Build the strategy. `cost_price` must be positive; the facade validates.
pub fn build_strategy(
    config: &EngineConfig,
    sale_price: Decimal,
    cost_price: Decimal,
    commission_rate: Decimal,
) -> PricingStrategy {
    let model = DeductionModel::new(&config.fees);
    let solver = PriceSolver::new(config);
    let cent = Decimal::from_cents(1);

    let breakdown = model.breakdown(sale_price, commission_rate);
    let current = model.profit(sale_price, cost_price, commission_rate);

    let point = |kind: TierPointKind, price: Decimal| TierPricePoint {
        kind,
        price,
        shipping: model.shipping_cost(price),
        net_profit: model.net_profit_at(price, cost_price, commission_rate),
    };

    let mut tier_rows = Vec::new();
    for tier in config.fees.tiers() {
        let mut points = Vec::new();
        if tier.min_price.is_positive() {
            points.push(point(TierPointKind::BelowStart, tier.min_price - cent));
            points.push(point(TierPointKind::Start, tier.min_price));
        }
        let mid = match tier.max_price {
            Some(max) => (tier.min_price + max) / Decimal::from_int(2),
            None => tier.min_price + Decimal::from_int(100),
        };
        points.push(point(TierPointKind::Mid, mid.round_2dp()));
        if let Some(max) = tier.max_price {
            points.push(point(TierPointKind::End, max));
        }
        tier_rows.push(TierProfitRow {
            tier: tier.clone(),
            points,
        });
    }

    let sweet_spots = boundary_prices(config)
        .into_iter()
        .filter_map(|price| {
            let net_profit = model.net_profit_at(price, cost_price, commission_rate);
            net_profit.is_positive().then(|| SweetSpot {
                price,
                net_profit,
                shipping: model.shipping_cost(price),
            })
        })
        .collect();

    let coupon = coupon_plan(config, &model, sale_price, cost_price, commission_rate);
    let tier_opportunity =
        find_tier_opportunity(config, sale_price, Some(cost_price), commission_rate);

    let min_price = solver.min_price(cost_price, commission_rate);
    let recommended_price = solver.recommended_price(cost_price, commission_rate);

    PricingStrategy {
        breakdown,
        current,
        tier_rows,
        sweet_spots,
        coupon,
        tier_opportunity,
        min_price,
        recommended_price,
        target_margin_pct: (config.ideal_margin(cost_price) * Decimal::hundred()).round_whole(),
    }
}

/// Every tier-transition price: each bounded tier's end and each later
/// tier's start, ascending.
fn boundary_prices(config: &EngineConfig) -> Vec<Decimal> {
    let mut prices = Vec::new();
    for tier in config.fees.tiers() {
        if tier.min_price.is_positive() {
            prices.push(tier.min_price);
        }
        if let Some(max) = tier.max_price {
            prices.push(max);
        }
    }
    prices.sort();
    prices
}

/// Only offered when the checkout total can land on the cheapest tier's
/// breakpoint at a profit; elsewhere the shipping saving rarely covers the
/// coupon.
fn coupon_plan(
    config: &EngineConfig,
    model: &DeductionModel,
    sale_price: Decimal,
    cost_price: Decimal,
    commission_rate: Decimal,
) -> Option<CouponPlan> {
    let first_tier_max = config.fees.tiers().first()?.max_price?;
    if sale_price <= first_tier_max {
        return None;
    }

    let profit_at_checkout = model.net_profit_at(first_tier_max, cost_price, commission_rate);
    if !profit_at_checkout.is_positive() {
        return None;
    }

    let display_price = (sale_price * Decimal::from_cents(115)).ceil_whole();
    let coupon_amount = (display_price - first_tier_max).ceil_whole();
    Some(CouponPlan {
        display_price,
        coupon_amount,
        checkout_price: first_tier_max,
        profit_at_checkout,
        shipping_saved: model.shipping_cost(sale_price) - model.shipping_cost(first_tier_max),
    })
}
