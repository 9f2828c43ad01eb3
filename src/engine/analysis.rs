//! Per-product and bulk profit analysis, price simulation, order-line
//! analysis.
//!
//! Everything here is defensive: a malformed entry (negative price, missing
//! cost) produces a degraded analysis instead of an error, so one bad product
//! never aborts a catalog-wide run.

use crate::config::EngineConfig;
use crate::domain::{Barcode, CommissionSource, Decimal, OrderLine, Product};
use crate::engine::deductions::{DeductionBreakdown, DeductionModel};
use crate::engine::solver::PriceSolver;
use serde::{Deserialize, Serialize};

/// Solver-backed price recommendation attached to a product analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendedPricing {
    pub price: Decimal,
    /// Net profit the product would earn at the recommended price.
    pub projected_profit: Decimal,
    /// The cost-banded target margin that produced the recommendation, in
    /// percent of cost.
    pub target_margin_pct: Decimal,
    pub converged: bool,
}

/// Full profitability picture for one product at its current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAnalysis {
    pub barcode: Barcode,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub category_name: String,
    pub sale_price: Decimal,
    pub list_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<Decimal>,
    pub commission_rate: Decimal,
    pub commission_source: CommissionSource,
    pub deductions: DeductionBreakdown,
    pub net_revenue: Decimal,
    /// `None` while the seller has not entered a cost price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_profit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_margin_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<RecommendedPricing>,
}

/// Aggregate counters over a bulk analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total_products: usize,
    pub with_cost: usize,
    pub without_cost: usize,
    pub profitable: usize,
    pub unprofitable: usize,
    /// Sum of net profit over products with a known cost.
    pub total_profit: Decimal,
}

/// Bulk analysis output: one analysis per input product plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogAnalysis {
    pub products: Vec<ProductAnalysis>,
    pub summary: CatalogSummary,
}

/// One step of a price simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub sale_price: Decimal,
    pub net_revenue: Decimal,
    pub net_profit: Decimal,
}

/// Order-line profitability, scaled by the line quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineAnalysis {
    pub unit_price: Decimal,
    pub list_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<Decimal>,
    pub commission_rate: Decimal,
    pub quantity: u32,
    pub commission_amount: Decimal,
    pub shipping_cost: Decimal,
    pub platform_fee: Decimal,
    pub total_deductions: Decimal,
    pub net_revenue: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_profit: Option<Decimal>,
}

/// Clamp a caller-supplied price or rate into the range the fee arithmetic
/// assumes.
fn clamp_price(value: Decimal) -> Decimal {
    value.max(Decimal::zero())
}

fn clamp_rate(value: Decimal) -> Decimal {
    value.max(Decimal::zero()).min(Decimal::hundred())
}

/// Analyze a single product at its current sale price.
pub fn analyze_product(config: &EngineConfig, product: &Product) -> ProductAnalysis {
    let model = DeductionModel::new(&config.fees);
    let sale_price = clamp_price(product.sale_price);
    let rate = clamp_rate(product.commission_rate);

    let deductions = model.breakdown(sale_price, rate);
    let net_revenue = sale_price - deductions.total;

    let (net_profit, profit_margin_pct) = match product.cost_price {
        Some(cost) => {
            let profit = model.profit(sale_price, cost, rate);
            (Some(profit.net_profit), Some(profit.profit_margin_pct))
        }
        None => (None, None),
    };

    let recommended = product.cost_price.filter(|c| c.is_positive()).map(|cost| {
        let solver = PriceSolver::new(config);
        let solved = solver.recommended_price(cost, rate);
        RecommendedPricing {
            price: solved.price,
            projected_profit: model.net_profit_at(solved.price, cost, rate),
            target_margin_pct: (config.ideal_margin(cost) * Decimal::hundred()).round_whole(),
            converged: solved.converged,
        }
    });

    ProductAnalysis {
        barcode: product.barcode.clone(),
        title: product.title.clone(),
        brand: product.brand.clone(),
        category_name: product.category_name.clone(),
        sale_price,
        list_price: product.list_price.max(sale_price),
        cost_price: product.cost_price,
        commission_rate: rate,
        commission_source: product.commission_source,
        deductions,
        net_revenue,
        net_profit,
        profit_margin_pct,
        recommended,
    }
}

/// Analyze a whole catalog and summarize it.
pub fn analyze_catalog(config: &EngineConfig, products: &[Product]) -> CatalogAnalysis {
    let analyses: Vec<ProductAnalysis> = products
        .iter()
        .map(|p| analyze_product(config, p))
        .collect();

    let mut summary = CatalogSummary {
        total_products: analyses.len(),
        with_cost: 0,
        without_cost: 0,
        profitable: 0,
        unprofitable: 0,
        total_profit: Decimal::zero(),
    };

    for analysis in &analyses {
        match analysis.net_profit {
            Some(profit) => {
                summary.with_cost += 1;
                summary.total_profit = summary.total_profit + profit;
                if profit.is_positive() {
                    summary.profitable += 1;
                } else if profit.is_negative() {
                    summary.unprofitable += 1;
                }
            }
            None => summary.without_cost += 1,
        }
    }

    CatalogAnalysis {
        products: analyses,
        summary,
    }
}

/// Profit curve over a stepped price range, inclusive of both ends.
///
/// A non-positive step yields an empty curve.
pub fn simulate_prices(
    config: &EngineConfig,
    cost_price: Decimal,
    commission_rate: Decimal,
    from: Decimal,
    to: Decimal,
    step: Decimal,
) -> Vec<PricePoint> {
    if !step.is_positive() || from > to {
        return Vec::new();
    }

    let model = DeductionModel::new(&config.fees);
    let rate = clamp_rate(commission_rate);
    let mut points = Vec::new();
    let mut price = clamp_price(from);
    while price <= to {
        let profit = model.profit(price, cost_price, rate);
        points.push(PricePoint {
            sale_price: price,
            net_revenue: profit.net_revenue,
            net_profit: profit.net_profit,
        });
        price = price + step;
    }
    points
}

/// Analyze one order line; all money fields are scaled by the quantity.
///
/// The commission rate comes from the order feed when present; otherwise the
/// line is treated as commission-free rather than guessed at.
pub fn analyze_order_line(
    config: &EngineConfig,
    line: &OrderLine,
    cost_price: Option<Decimal>,
) -> OrderLineAnalysis {
    let model = DeductionModel::new(&config.fees);
    let unit_price = clamp_price(line.unit_price);
    let rate = clamp_rate(line.commission_rate.unwrap_or_else(Decimal::zero));
    let quantity = Decimal::from_int(i64::from(line.quantity));

    let breakdown = model.breakdown(unit_price, rate);
    let net_revenue = unit_price - breakdown.total;
    let net_profit = cost_price.map(|cost| (net_revenue - cost) * quantity);

    OrderLineAnalysis {
        unit_price,
        list_price: line.list_price.max(unit_price),
        cost_price,
        commission_rate: rate,
        quantity: line.quantity,
        commission_amount: breakdown.commission * quantity,
        shipping_cost: breakdown.shipping * quantity,
        platform_fee: breakdown.platform_fee * quantity,
        total_deductions: breakdown.total * quantity,
        net_revenue: net_revenue * quantity,
        net_profit,
    }
}
