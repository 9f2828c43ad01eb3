use proptest::prelude::*;

use pricecraft::engine::title::score_title;
use pricecraft::engine::{
    analyze_competitors, CompetitiveAnalysis, DeductionModel, PriceSolver,
};
use pricecraft::{CompetitorListing, Decimal, EngineConfig, FeeSchedule, RubricConfig};

fn cents(value: i64) -> Decimal {
    Decimal::from_cents(value)
}

proptest! {
    /// Tiers partition [0, infinity): every price matches exactly one tier.
    #[test]
    fn shipping_tiers_partition_prices(price_cents in 0i64..1_000_000_00) {
        let schedule = FeeSchedule::standard();
        let price = cents(price_cents);
        let matching = schedule
            .tiers()
            .iter()
            .filter(|tier| tier.contains(price))
            .count();
        prop_assert_eq!(matching, 1);
    }

    /// Total deductions never decrease as the commission rate grows.
    #[test]
    fn deductions_monotone_in_rate(
        price_cents in 1i64..50_000_00,
        rate_a in 0i64..=100,
        rate_b in 0i64..=100,
    ) {
        let schedule = FeeSchedule::standard();
        let model = DeductionModel::new(&schedule);
        let price = cents(price_cents);
        let (low, high) = if rate_a <= rate_b { (rate_a, rate_b) } else { (rate_b, rate_a) };
        prop_assert!(
            model.total_deductions(price, Decimal::from_int(low))
                <= model.total_deductions(price, Decimal::from_int(high))
        );
    }

    /// Break-even round trip: the solved price covers costs, and one cent
    /// less loses money whenever that cent stays inside the same shipping
    /// tier.
    #[test]
    fn break_even_round_trip(cost_cents in 1i64..50_000_00, rate in 0i64..=90) {
        let config = EngineConfig::default();
        let solver = PriceSolver::new(&config);
        let model = DeductionModel::new(&config.fees);
        let cost = cents(cost_cents);
        let rate = Decimal::from_int(rate);

        let solved = solver.min_price(cost, rate);
        prop_assert!(solved.converged);
        prop_assert!(model.net_profit_at(solved.price, cost, rate) >= Decimal::zero());

        let below = solved.price - cents(1);
        if model.shipping_cost(below) == model.shipping_cost(solved.price) {
            prop_assert!(model.net_profit_at(below, cost, rate) < Decimal::zero());
        }
    }

    /// Re-solving from the converged price reproduces it.
    #[test]
    fn solver_idempotent(cost_cents in 1i64..50_000_00, rate in 0i64..=90) {
        let config = EngineConfig::default();
        let solver = PriceSolver::new(&config);
        let cost = cents(cost_cents);
        let rate = Decimal::from_int(rate);

        let first = solver.min_price(cost, rate);
        let again = solver.solve_with_seed(first.price, cost, rate, Decimal::zero());
        prop_assert_eq!(first.price, again.price);
    }

    /// Title scores stay in [5, 100] and every rubric row stays under its
    /// cap, for arbitrary input text.
    #[test]
    fn title_score_bounds(title in ".{0,200}", brand in proptest::option::of("[A-Za-z]{2,12}")) {
        let rubric = RubricConfig::default();
        let corpus = vec![
            "Insulated Steel Bottle 500ml".to_string(),
            "Steel Thermos Flask Travel".to_string(),
        ];
        let result = score_title(&rubric, &title, brand.as_deref(), "Bottle", &corpus);
        prop_assert!(result.score >= 5);
        prop_assert!(result.score <= 100);
        for row in &result.breakdown {
            prop_assert!(row.score <= row.max);
        }
        let cap_total: u32 = result.breakdown.iter().map(|r| r.max).sum();
        prop_assert_eq!(cap_total, 100);
    }

    /// Every competitor lands on exactly one side of the subject price and
    /// the percentile matches the cheaper share.
    #[test]
    fn price_position_invariant(
        prices in prop::collection::vec(1i64..100_000, 1..40),
        subject in 1i64..100_000,
    ) {
        let config = EngineConfig::default();
        let competitors: Vec<CompetitorListing> = prices
            .iter()
            .map(|p| {
                let price = Decimal::from_int(*p);
                CompetitorListing::new("Listing", "Rival", price, price)
            })
            .collect();

        let analysis = analyze_competitors(
            &config,
            Decimal::from_int(subject),
            "Category",
            &competitors,
            None,
            None,
        );
        let market = match analysis {
            CompetitiveAnalysis::Market(m) => m,
            // Non-empty positive prices always produce data.
            CompetitiveAnalysis::NoData { .. } => unreachable!(),
        };

        prop_assert_eq!(
            market.position.cheaper_count + market.position.expensive_count,
            market.stats.count
        );
        let expected =
            ((200 * market.position.cheaper_count + market.stats.count) / (2 * market.stats.count)) as u32;
        prop_assert_eq!(market.position.percentile, expected);
        prop_assert!(market.position.percentile <= 100);

        // Quartile segments account for every competitor exactly once.
        let segmented: usize = market.segments.iter().map(|s| s.count).sum();
        prop_assert_eq!(segmented, market.stats.count);
        prop_assert_eq!(market.segments.iter().filter(|s| s.contains_subject).count(), 1);
    }
}
