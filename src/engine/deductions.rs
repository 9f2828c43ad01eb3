//! The per-sale deduction model: shipping tier lookup, commission, platform
//! fee, and the profit figures derived from them.

use crate::config::FeeSchedule;
use crate::domain::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the marketplace withholds from a single sale.
///
/// Derived data: recomputed on every evaluation, never cached across price
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    pub shipping: Decimal,
    pub commission: Decimal,
    pub commission_rate: Decimal,
    pub platform_fee: Decimal,
    pub total: Decimal,
}

/// Net outcome of a sale at a known cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitResult {
    /// Sale price minus total deductions.
    pub net_revenue: Decimal,
    /// Net revenue minus cost price.
    pub net_profit: Decimal,
    /// Net profit relative to the sale price, one decimal place; zero when
    /// the sale price is zero.
    pub profit_margin_pct: Decimal,
}

/// Pure fee arithmetic over an immutable [`FeeSchedule`].
///
/// No error conditions: callers clamp inputs to non-negative numbers first.
#[derive(Debug, Clone, Copy)]
pub struct DeductionModel<'a> {
    schedule: &'a FeeSchedule,
}

impl<'a> DeductionModel<'a> {
    pub fn new(schedule: &'a FeeSchedule) -> Self {
        DeductionModel { schedule }
    }

    /// Cost of the tier containing `price`.
    ///
    /// A gap-free schedule always matches; the last tier's cost doubles as
    /// the fallback for anything that slips through.
    pub fn shipping_cost(&self, price: Decimal) -> Decimal {
        let tiers = self.schedule.tiers();
        tiers
            .iter()
            .find(|tier| tier.contains(price))
            .map(|tier| tier.cost)
            .unwrap_or_else(|| tiers[tiers.len() - 1].cost)
    }

    /// Commission withheld at `rate` percent of `price`.
    pub fn commission_amount(&self, price: Decimal, rate: Decimal) -> Decimal {
        price * rate / Decimal::hundred()
    }

    /// Shipping + commission + platform fee.
    pub fn total_deductions(&self, price: Decimal, rate: Decimal) -> Decimal {
        self.shipping_cost(price) + self.commission_amount(price, rate) + self.schedule.platform_fee
    }

    /// Full deduction breakdown at `price`.
    pub fn breakdown(&self, price: Decimal, rate: Decimal) -> DeductionBreakdown {
        let shipping = self.shipping_cost(price);
        let commission = self.commission_amount(price, rate);
        let platform_fee = self.schedule.platform_fee;
        DeductionBreakdown {
            shipping,
            commission,
            commission_rate: rate,
            platform_fee,
            total: shipping + commission + platform_fee,
        }
    }

    /// Net profit of selling at `price` with a known `cost_price`.
    pub fn net_profit_at(&self, price: Decimal, cost_price: Decimal, rate: Decimal) -> Decimal {
        price - self.total_deductions(price, rate) - cost_price
    }

    /// Net revenue, net profit and margin at `price`.
    pub fn profit(&self, price: Decimal, cost_price: Decimal, rate: Decimal) -> ProfitResult {
        let net_revenue = price - self.total_deductions(price, rate);
        let net_profit = net_revenue - cost_price;
        let profit_margin_pct = if price.is_positive() {
            (net_profit / price * Decimal::hundred()).round_1dp()
        } else {
            Decimal::zero()
        };
        ProfitResult {
            net_revenue,
            net_profit,
            profit_margin_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn model_fixture() -> FeeSchedule {
        FeeSchedule::standard()
    }

    #[test]
    fn test_shipping_cost_tier_boundaries() {
        let schedule = model_fixture();
        let model = DeductionModel::new(&schedule);

        assert_eq!(model.shipping_cost(d("0")), d("58.50"));
        assert_eq!(model.shipping_cost(d("149.99")), d("58.50"));
        assert_eq!(model.shipping_cost(d("150")), d("95.50"));
        assert_eq!(model.shipping_cost(d("299.99")), d("95.50"));
        assert_eq!(model.shipping_cost(d("300")), d("110"));
        assert_eq!(model.shipping_cost(d("399.99")), d("110"));
        assert_eq!(model.shipping_cost(d("400")), d("130"));
        assert_eq!(model.shipping_cost(d("10000")), d("130"));
    }

    #[test]
    fn test_commission_amount() {
        let schedule = model_fixture();
        let model = DeductionModel::new(&schedule);
        assert_eq!(model.commission_amount(d("200"), d("20")), d("40"));
        assert_eq!(model.commission_amount(d("100"), d("0")), d("0"));
    }

    #[test]
    fn test_total_deductions() {
        let schedule = model_fixture();
        let model = DeductionModel::new(&schedule);
        // 58.50 shipping + 20 commission + 13.80 platform
        assert_eq!(model.total_deductions(d("100"), d("20")), d("92.30"));
    }

    #[test]
    fn test_total_deductions_monotone_in_rate() {
        let schedule = model_fixture();
        let model = DeductionModel::new(&schedule);
        let price = d("250");
        let mut last = model.total_deductions(price, d("0"));
        for rate in 1..=100i64 {
            let current = model.total_deductions(price, Decimal::from_int(rate));
            assert!(current >= last, "deductions decreased at rate {}", rate);
            last = current;
        }
    }

    #[test]
    fn test_breakdown_sums() {
        let schedule = model_fixture();
        let model = DeductionModel::new(&schedule);
        let breakdown = model.breakdown(d("350"), d("15"));
        assert_eq!(breakdown.shipping, d("110"));
        assert_eq!(breakdown.commission, d("52.50"));
        assert_eq!(breakdown.platform_fee, d("13.80"));
        assert_eq!(
            breakdown.total,
            breakdown.shipping + breakdown.commission + breakdown.platform_fee
        );
    }

    #[test]
    fn test_profit_margin_relative_to_price() {
        let schedule = model_fixture();
        let model = DeductionModel::new(&schedule);
        let profit = model.profit(d("200"), d("50"), d("20"));
        // 200 - (95.50 + 40 + 13.80) = 50.70; minus cost 50 = 0.70
        assert_eq!(profit.net_revenue, d("50.70"));
        assert_eq!(profit.net_profit, d("0.70"));
        assert_eq!(profit.profit_margin_pct, d("0.4"));
    }

    #[test]
    fn test_profit_margin_zero_at_zero_price() {
        let schedule = model_fixture();
        let model = DeductionModel::new(&schedule);
        let profit = model.profit(Decimal::zero(), d("50"), d("20"));
        assert_eq!(profit.profit_margin_pct, Decimal::zero());
    }
}
