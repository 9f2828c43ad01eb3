//! Commission tariff scenarios from real order history.
//!
//! No synthetic rate tables: every scenario rate was actually charged on
//! some past order in this store. For each observed rate below the product's
//! current one, the analysis answers "what would I earn at that rate", both
//! at the current price and at stepped price cuts.

use crate::config::EngineConfig;
use crate::domain::{Barcode, Decimal, Order, Product};
use crate::engine::deductions::DeductionModel;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Price-cut percentages explored per scenario.
const DROP_STEPS_PCT: [i64; 5] = [5, 10, 15, 20, 25];

/// Usage evidence for one observed commission rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedRate {
    pub rate: Decimal,
    pub sales_count: usize,
    pub product_count: usize,
    pub min_price: Decimal,
    pub max_price: Decimal,
    /// Up to three example barcodes trading at this rate.
    pub example_barcodes: Vec<Barcode>,
}

/// Outcome of cutting the price by `drop_pct` under a scenario rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceDropScenario {
    pub drop_pct: Decimal,
    pub new_price: Decimal,
    pub new_shipping: Decimal,
    pub new_commission: Decimal,
    pub new_profit: Decimal,
    /// Against the current profit at the current rate.
    pub profit_gain: Decimal,
    pub profitable: bool,
    pub better_than_current: bool,
}

/// What a lower observed rate would mean for this product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffScenario {
    pub observed: ObservedRate,
    /// Percentage points saved against the current rate.
    pub rate_saving: Decimal,
    pub profit_at_same_price: Decimal,
    pub commission_saving: Decimal,
    pub profit_gain_same_price: Decimal,
    /// The product itself traded at this rate in the past.
    pub used_before: bool,
    pub drops: Vec<PriceDropScenario>,
    /// Best drop: first improving, else first profitable, else the smallest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_drop: Option<PriceDropScenario>,
}

/// Full tariff picture for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffAnalysis {
    pub current_rate: Decimal,
    pub current_profit: Decimal,
    pub current_commission: Decimal,
    pub current_shipping: Decimal,
    /// Every distinct rate seen in the store, ascending.
    pub store_rates: Vec<Decimal>,
    /// Distinct rates this product traded at, ascending.
    pub product_rates: Vec<Decimal>,
    pub scenarios: Vec<TariffScenario>,
    pub has_opportunity: bool,
}

/// Build the tariff analysis; `None` when the product lacks a cost or a
/// positive sale price, matching the rest of the cost-dependent surface.
pub fn tariff_analysis(
    config: &EngineConfig,
    product: &Product,
    orders: &[Order],
) -> Option<TariffAnalysis> {
    let cost_price = product.cost_price.filter(|c| c.is_positive())?;
    if !product.sale_price.is_positive() {
        return None;
    }

    let model = DeductionModel::new(&config.fees);
    let sale_price = product.sale_price;
    let current_rate = product.commission_rate;
    let current_profit = model.net_profit_at(sale_price, cost_price, current_rate);
    let current_commission = model.commission_amount(sale_price, current_rate);

    // Aggregate observed rates across the whole store.
    let mut observed: BTreeMap<Decimal, (usize, BTreeSet<Barcode>, Decimal, Decimal)> =
        BTreeMap::new();
    let mut product_rates: BTreeSet<Decimal> = BTreeSet::new();
    for order in orders {
        for line in &order.lines {
            let Some(rate) = line.commission_rate else {
                continue;
            };
            if line.barcode == product.barcode {
                product_rates.insert(rate);
            }
            let entry = observed
                .entry(rate)
                .or_insert((0, BTreeSet::new(), line.unit_price, line.unit_price));
            entry.0 += 1;
            entry.1.insert(line.barcode.clone());
            entry.2 = entry.2.min(line.unit_price);
            entry.3 = entry.3.max(line.unit_price);
        }
    }

    let store_rates: Vec<Decimal> = observed.keys().copied().collect();

    let mut scenarios = Vec::new();
    for (rate, (sales_count, barcodes, min_price, max_price)) in &observed {
        // Only rates below the current one are worth a scenario.
        if *rate >= current_rate {
            continue;
        }

        let profit_at_same_price = model.net_profit_at(sale_price, cost_price, *rate);
        let commission_saving = current_commission - model.commission_amount(sale_price, *rate);

        let drops: Vec<PriceDropScenario> = DROP_STEPS_PCT
            .iter()
            .filter_map(|drop| {
                let drop_pct = Decimal::from_int(*drop);
                let factor = Decimal::one() - drop_pct / Decimal::hundred();
                let new_price = (sale_price * factor).round_2dp();
                if new_price < cost_price {
                    return None;
                }
                let new_profit = model.net_profit_at(new_price, cost_price, *rate);
                Some(PriceDropScenario {
                    drop_pct,
                    new_price,
                    new_shipping: model.shipping_cost(new_price),
                    new_commission: model.commission_amount(new_price, *rate),
                    new_profit,
                    profit_gain: new_profit - current_profit,
                    profitable: new_profit.is_positive(),
                    better_than_current: new_profit > current_profit,
                })
            })
            .collect();

        let best_drop = drops
            .iter()
            .find(|s| s.better_than_current)
            .or_else(|| drops.iter().find(|s| s.profitable))
            .or_else(|| drops.first())
            .copied();

        scenarios.push(TariffScenario {
            observed: ObservedRate {
                rate: *rate,
                sales_count: *sales_count,
                product_count: barcodes.len(),
                min_price: *min_price,
                max_price: *max_price,
                example_barcodes: barcodes.iter().take(3).cloned().collect(),
            },
            rate_saving: current_rate - *rate,
            profit_at_same_price,
            commission_saving,
            profit_gain_same_price: profit_at_same_price - current_profit,
            used_before: product_rates.contains(rate),
            drops,
            best_drop,
        });
    }

    let has_opportunity = scenarios.iter().any(|s| {
        s.profit_gain_same_price.is_positive()
            || s.best_drop.map_or(false, |d| d.better_than_current)
    });

    Some(TariffAnalysis {
        current_rate,
        current_profit,
        current_commission,
        current_shipping: model.shipping_cost(sale_price),
        store_rates,
        product_rates: product_rates.into_iter().collect(),
        scenarios,
        has_opportunity,
    })
}
