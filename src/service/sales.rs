//! Sales reporting over a time window of orders.

use crate::config::EngineConfig;
use crate::domain::{Barcode, Decimal, Order, TimeMs};
use crate::engine::analysis::{analyze_order_line, OrderLineAnalysis};
use crate::service::cost_store::CostStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One sold line with its profitability analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub order_number: String,
    pub order_date: TimeMs,
    pub barcode: Barcode,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub analysis: OrderLineAnalysis,
}

/// Period totals across all reported lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_orders: usize,
    pub total_items: usize,
    /// Lines whose product has no cost entered; their profit is unknown and
    /// excluded from `total_profit`.
    pub lines_without_cost: usize,
    pub total_revenue: Decimal,
    pub total_shipping: Decimal,
    pub total_commission: Decimal,
    pub total_platform_fees: Decimal,
    pub total_deductions: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
}

/// Sales report: per-line analyses, newest first, plus period totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub lines: Vec<SaleLine>,
    pub summary: SalesSummary,
}

/// Analyze every order line dated inside `[from, to]`.
///
/// Order feeds page by last-update time, so callers typically fetch a wider
/// window and let this filter on the true order date.
pub fn sales_report(
    config: &EngineConfig,
    costs: &CostStore,
    orders: &[Order],
    from: TimeMs,
    to: TimeMs,
) -> SalesReport {
    let mut lines = Vec::new();
    let mut order_numbers: HashSet<&str> = HashSet::new();

    let mut total_revenue = Decimal::zero();
    let mut total_shipping = Decimal::zero();
    let mut total_commission = Decimal::zero();
    let mut total_platform_fees = Decimal::zero();
    let mut total_cost = Decimal::zero();
    let mut total_profit = Decimal::zero();
    let mut lines_without_cost = 0;

    for order in orders {
        if order.order_date < from || order.order_date > to {
            continue;
        }
        if !order.lines.is_empty() {
            order_numbers.insert(order.order_number.as_str());
        }
        for line in &order.lines {
            let cost_price = costs.get(&line.barcode);
            let analysis = analyze_order_line(config, line, cost_price);
            let quantity = Decimal::from_int(i64::from(analysis.quantity));

            total_revenue = total_revenue + analysis.unit_price * quantity;
            total_shipping = total_shipping + analysis.shipping_cost;
            total_commission = total_commission + analysis.commission_amount;
            total_platform_fees = total_platform_fees + analysis.platform_fee;
            match (analysis.net_profit, cost_price) {
                (Some(profit), Some(cost)) => {
                    total_profit = total_profit + profit;
                    total_cost = total_cost + cost * quantity;
                }
                _ => lines_without_cost += 1,
            }

            lines.push(SaleLine {
                order_number: order.order_number.clone(),
                order_date: order.order_date,
                barcode: line.barcode.clone(),
                product_name: line.product_name.clone(),
                status: line.status.clone(),
                analysis,
            });
        }
    }

    lines.sort_by(|a, b| b.order_date.cmp(&a.order_date));

    let summary = SalesSummary {
        total_orders: order_numbers.len(),
        total_items: lines.len(),
        lines_without_cost,
        total_revenue,
        total_shipping,
        total_commission,
        total_platform_fees,
        total_deductions: total_shipping + total_commission + total_platform_fees,
        total_cost,
        total_profit,
    };

    SalesReport { lines, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderLine;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn fixture_orders() -> Vec<Order> {
        vec![
            Order::new(
                "o1",
                TimeMs::new(1000),
                vec![
                    OrderLine::new(Barcode::new("b1"), "Bottle", d("100"))
                        .with_commission_rate(d("20")),
                    OrderLine::new(Barcode::new("b2"), "Mug", d("80"))
                        .with_commission_rate(d("15")),
                ],
            ),
            Order::new(
                "o2",
                TimeMs::new(5000),
                vec![OrderLine::new(Barcode::new("b1"), "Bottle", d("100"))
                    .with_quantity(2)
                    .with_commission_rate(d("20"))],
            ),
            Order::new(
                "o3",
                TimeMs::new(9000),
                vec![OrderLine::new(Barcode::new("b3"), "Tray", d("60"))],
            ),
        ]
    }

    #[test]
    fn test_window_filters_on_order_date() {
        let config = EngineConfig::default();
        let costs = CostStore::new();
        let report = sales_report(
            &config,
            &costs,
            &fixture_orders(),
            TimeMs::new(2000),
            TimeMs::new(8000),
        );
        assert_eq!(report.summary.total_orders, 1);
        assert_eq!(report.summary.total_items, 1);
        assert_eq!(report.lines[0].order_number, "o2");
    }

    #[test]
    fn test_lines_sorted_newest_first() {
        let config = EngineConfig::default();
        let costs = CostStore::new();
        let report = sales_report(
            &config,
            &costs,
            &fixture_orders(),
            TimeMs::new(0),
            TimeMs::new(10_000),
        );
        assert_eq!(report.summary.total_items, 4);
        let dates: Vec<i64> = report.lines.iter().map(|l| l.order_date.as_i64()).collect();
        assert_eq!(dates, vec![9000, 5000, 1000, 1000]);
    }

    #[test]
    fn test_summary_totals() {
        let config = EngineConfig::default();
        let mut costs = CostStore::new();
        costs.set(Barcode::new("b1"), d("30"));

        let report = sales_report(
            &config,
            &costs,
            &fixture_orders(),
            TimeMs::new(0),
            TimeMs::new(10_000),
        );

        // Revenue: 100 + 80 + 100*2 + 60 = 440
        assert_eq!(report.summary.total_revenue, d("440"));
        // Three b1 units have a cost; the other two lines do not.
        assert_eq!(report.summary.total_cost, d("90"));
        assert_eq!(report.summary.lines_without_cost, 2);
        assert_eq!(
            report.summary.total_deductions,
            report.summary.total_shipping
                + report.summary.total_commission
                + report.summary.total_platform_fees
        );
        // b1 per unit: 100 - 58.50 - 20 - 13.80 - 30 = -22.30, three units
        assert_eq!(report.summary.total_profit, d("-66.90"));
    }

    #[test]
    fn test_empty_window() {
        let config = EngineConfig::default();
        let costs = CostStore::new();
        let report = sales_report(
            &config,
            &costs,
            &fixture_orders(),
            TimeMs::new(20_000),
            TimeMs::new(30_000),
        );
        assert!(report.lines.is_empty());
        assert_eq!(report.summary.total_orders, 0);
        assert_eq!(report.summary.total_profit, Decimal::zero());
    }
}
