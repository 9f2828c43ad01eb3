use pricecraft::domain::{CommissionSource, OrderLine};
use pricecraft::{Barcode, Decimal, Engine, Order, Product, StoreService, TimeMs};

fn d(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).unwrap()
}

fn listing(barcode: &str, title: &str, price: &str, category: &str) -> Product {
    Product::new(Barcode::new(barcode), title, d(price)).with_category(category)
}

fn order_history() -> Vec<Order> {
    vec![
        Order::new(
            "ord-100",
            TimeMs::new(1_000),
            vec![
                OrderLine::new(Barcode::new("b1"), "Steel Bottle", d("180"))
                    .with_commission_rate(d("21.5")),
                OrderLine::new(Barcode::new("b2"), "Glass Mug", d("85"))
                    .with_commission_rate(d("16")),
            ],
        ),
        Order::new(
            "ord-101",
            TimeMs::new(5_000),
            vec![OrderLine::new(Barcode::new("b1"), "Steel Bottle", d("180"))
                .with_commission_rate(d("18"))],
        ),
    ]
}

#[test]
fn test_full_store_analysis_pipeline() {
    let mut service = StoreService::new(Engine::default());
    service.set_costs(vec![
        (Barcode::new("b1"), d("60")),
        (Barcode::new("b2"), d("30")),
    ]);

    let listings = vec![
        listing("b1", "Steel Bottle", "250", "Drinkware"),
        listing("b2", "Glass Mug", "85", "Drinkware"),
        listing("b3", "Serving Tray", "120", "Kitchen"),
    ];
    let analysis = service.analyze_store(listings, &order_history());

    assert_eq!(analysis.summary.total_products, 3);
    assert_eq!(analysis.summary.with_cost, 2);
    assert_eq!(analysis.summary.without_cost, 1);

    // b1 uses its latest observed rate, not the older one.
    let b1 = &analysis.products[0];
    assert_eq!(b1.commission_rate, d("18"));
    assert_eq!(b1.commission_source, CommissionSource::OrderHistory);
    // 250 - (95.50 + 45 + 13.80) - 60
    assert_eq!(b1.net_profit, Some(d("35.70")));
    assert!(b1.recommended.is_some());

    // b3 has no observations in its category: default rate, no cost.
    let b3 = &analysis.products[2];
    assert_eq!(b3.commission_source, CommissionSource::Default);
    assert_eq!(b3.commission_rate, d("20"));
    assert_eq!(b3.net_profit, None);
}

#[test]
fn test_batch_survives_malformed_entries() {
    let service = StoreService::new(Engine::default());

    let listings = vec![
        listing("b1", "Steel Bottle", "250", "Drinkware"),
        listing("b2", "", "-10", "Drinkware"), // nonsense entry
        listing("b3", "Serving Tray", "0", "Kitchen"),
    ];
    let analysis = service.analyze_store(listings, &[]);

    // Nothing panics and nothing is dropped.
    assert_eq!(analysis.summary.total_products, 3);
    assert_eq!(analysis.products[1].sale_price, Decimal::zero());
}

#[test]
fn test_sales_report_applies_stored_costs() {
    let mut service = StoreService::new(Engine::default());
    service.set_cost(Barcode::new("b1"), d("60"));

    let report = service.sales_report(&order_history(), TimeMs::new(0), TimeMs::new(10_000));

    assert_eq!(report.summary.total_orders, 2);
    assert_eq!(report.summary.total_items, 3);
    // The mug has no stored cost.
    assert_eq!(report.summary.lines_without_cost, 1);
    assert_eq!(report.summary.total_cost, d("120"));
    assert_eq!(report.lines[0].order_number, "ord-101");
}

#[test]
fn test_tariff_scenarios_from_store_history() {
    let mut service = StoreService::new(Engine::default());
    service.set_cost(Barcode::new("b1"), d("60"));

    let product = Product::new(Barcode::new("b1"), "Steel Bottle", d("250"))
        .with_commission(d("21.5"), CommissionSource::OrderHistory);
    let analysis = service
        .tariff_analysis(&product, &order_history())
        .expect("cost available in store");

    assert_eq!(analysis.store_rates, vec![d("16"), d("18"), d("21.5")]);
    assert_eq!(analysis.scenarios.len(), 2);
    // The 18% rate was charged on this very product before.
    let eighteen = analysis
        .scenarios
        .iter()
        .find(|s| s.observed.rate == d("18"))
        .unwrap();
    assert!(eighteen.used_before);
    assert!(analysis.has_opportunity);
}

#[test]
fn test_cost_lifecycle() {
    let mut service = StoreService::new(Engine::default());

    service.set_cost(Barcode::new("b1"), d("60"));
    assert_eq!(service.costs().get(&Barcode::new("b1")), Some(d("60")));

    service.set_cost(Barcode::new("b1"), d("65"));
    assert_eq!(service.costs().get(&Barcode::new("b1")), Some(d("65")));

    // Resetting to zero or below removes the entry entirely.
    service.set_cost(Barcode::new("b1"), Decimal::zero());
    assert_eq!(service.costs().get(&Barcode::new("b1")), None);
}
