//! Commission rate resolution.
//!
//! The marketplace does not publish per-product commission rates; the only
//! ground truth is what it actually charged on past orders. Rates are mined
//! from order history per barcode, then missing products fall back to their
//! category's average and finally to the configured default.

use crate::config::EngineConfig;
use crate::domain::{Barcode, CommissionSource, Decimal, Order, Product};
use std::collections::HashMap;

/// Mine per-barcode commission rates from order history.
///
/// Orders are walked oldest-first so the most recent observation wins.
pub fn rates_from_orders(orders: &[Order]) -> HashMap<Barcode, Decimal> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by_key(|o| o.order_date);

    let mut rates = HashMap::new();
    for order in sorted {
        for line in &order.lines {
            if let Some(rate) = line.commission_rate {
                rates.insert(line.barcode.clone(), rate);
            }
        }
    }
    rates
}

/// Average observed rate per category, to one decimal place, computed over
/// the products that have a direct barcode observation.
pub fn category_averages(
    products: &[Product],
    rates: &HashMap<Barcode, Decimal>,
) -> HashMap<String, Decimal> {
    let mut buckets: HashMap<String, Vec<Decimal>> = HashMap::new();
    for product in products {
        if product.category_name.is_empty() {
            continue;
        }
        if let Some(rate) = rates.get(&product.barcode) {
            buckets
                .entry(product.category_name.clone())
                .or_default()
                .push(*rate);
        }
    }

    buckets
        .into_iter()
        .map(|(category, observed)| {
            let sum = observed
                .iter()
                .fold(Decimal::zero(), |acc, r| acc + *r);
            let avg = (sum / Decimal::from_int(observed.len() as i64)).round_1dp();
            (category, avg)
        })
        .collect()
}

/// Resolve one product's commission rate.
///
/// Priority: barcode observation, stock-code observation, category average,
/// configured default.
pub fn resolve_rate(
    config: &EngineConfig,
    product: &Product,
    rates: &HashMap<Barcode, Decimal>,
    averages: &HashMap<String, Decimal>,
) -> (Decimal, CommissionSource) {
    if let Some(rate) = rates.get(&product.barcode) {
        return (*rate, CommissionSource::OrderHistory);
    }
    if let Some(stock_code) = &product.stock_code {
        if let Some(rate) = rates.get(&Barcode::new(stock_code.clone())) {
            return (*rate, CommissionSource::OrderHistory);
        }
    }
    if let Some(avg) = averages.get(&product.category_name) {
        return (*avg, CommissionSource::CategoryAverage);
    }
    (config.default_commission_rate, CommissionSource::Default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderLine, TimeMs};

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn order(number: &str, date: i64, lines: Vec<OrderLine>) -> Order {
        Order::new(number, TimeMs::new(date), lines)
    }

    fn line(barcode: &str, rate: Option<&str>) -> OrderLine {
        let mut l = OrderLine::new(Barcode::new(barcode), "Item", d("100"));
        if let Some(rate) = rate {
            l = l.with_commission_rate(d(rate));
        }
        l
    }

    #[test]
    fn test_latest_order_wins() {
        let orders = vec![
            order("o2", 2000, vec![line("b1", Some("18"))]),
            order("o1", 1000, vec![line("b1", Some("21"))]),
        ];
        let rates = rates_from_orders(&orders);
        assert_eq!(rates.get(&Barcode::new("b1")), Some(&d("18")));
    }

    #[test]
    fn test_lines_without_rates_ignored() {
        let orders = vec![order("o1", 1000, vec![line("b1", None)])];
        assert!(rates_from_orders(&orders).is_empty());
    }

    #[test]
    fn test_category_averages_round_to_one_decimal() {
        let products = vec![
            Product::new(Barcode::new("b1"), "A", d("100")).with_category("Drinkware"),
            Product::new(Barcode::new("b2"), "B", d("100")).with_category("Drinkware"),
            Product::new(Barcode::new("b3"), "C", d("100")).with_category("Drinkware"),
        ];
        let mut rates = HashMap::new();
        rates.insert(Barcode::new("b1"), d("18"));
        rates.insert(Barcode::new("b2"), d("21.5"));
        // b3 has no observation and contributes nothing.

        let averages = category_averages(&products, &rates);
        assert_eq!(averages.get("Drinkware"), Some(&d("19.8")));
    }

    #[test]
    fn test_resolve_rate_priority() {
        let config = EngineConfig::default();
        let mut rates = HashMap::new();
        rates.insert(Barcode::new("b1"), d("18"));
        rates.insert(Barcode::new("SKU-7"), d("19"));
        let mut averages = HashMap::new();
        averages.insert("Drinkware".to_string(), d("21"));

        // Direct barcode observation.
        let direct = Product::new(Barcode::new("b1"), "A", d("100")).with_category("Drinkware");
        assert_eq!(
            resolve_rate(&config, &direct, &rates, &averages),
            (d("18"), CommissionSource::OrderHistory)
        );

        // Stock-code observation.
        let by_stock = Product::new(Barcode::new("b9"), "B", d("100"))
            .with_stock_code("SKU-7")
            .with_category("Drinkware");
        assert_eq!(
            resolve_rate(&config, &by_stock, &rates, &averages),
            (d("19"), CommissionSource::OrderHistory)
        );

        // Category fallback.
        let by_category =
            Product::new(Barcode::new("b8"), "C", d("100")).with_category("Drinkware");
        assert_eq!(
            resolve_rate(&config, &by_category, &rates, &averages),
            (d("21"), CommissionSource::CategoryAverage)
        );

        // Default.
        let unknown = Product::new(Barcode::new("b7"), "D", d("100")).with_category("Gadgets");
        assert_eq!(
            resolve_rate(&config, &unknown, &rates, &averages),
            (d("20"), CommissionSource::Default)
        );
    }
}
