//! Pure computation engine for pricing and competitive intelligence.
//!
//! Every function here is a synchronous computation over its arguments plus
//! the immutable [`EngineConfig`]; there is no I/O, no shared mutable state
//! and no internal concurrency. Callers may fan out over products freely.

use crate::config::EngineConfig;
use crate::domain::{CompetitorListing, Decimal, OrderLine, Product};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

pub mod analysis;
pub mod competition;
pub mod deductions;
pub mod solver;
pub mod strategy;
pub mod title;

pub use analysis::{
    analyze_catalog, analyze_order_line, analyze_product, simulate_prices, CatalogAnalysis,
    CatalogSummary, OrderLineAnalysis, PricePoint, ProductAnalysis, RecommendedPricing,
};
pub use competition::{
    analyze_competitors, CompetitiveAnalysis, DiscountPrevalence, MarketAnalysis, PricePosition,
    PriceRecommendation, PriceSegment, PriceStatistics, PositionLabel, RankedCompetitor,
    RecommendationKind, SegmentLabel, TierOpportunity,
};
pub use deductions::{DeductionBreakdown, DeductionModel, ProfitResult};
pub use solver::{PriceSolver, SolvedPrice, MAX_ITERATIONS};
pub use strategy::{
    build_strategy, CouponPlan, PricingStrategy, SweetSpot, TierPointKind, TierPricePoint,
    TierProfitRow,
};
pub use title::{
    score_title, synthesize_title, BreakdownRow, Issue, KeywordStat, ScoreLabel, Severity,
    TitleScore,
};

/// Input for a listing research run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub category_name: String,
    pub sale_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<Decimal>,
    pub competitors: Vec<CompetitorListing>,
}

/// Combined title and market analysis for one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub category_name: String,
    pub competitor_count: usize,
    pub title: TitleScore,
    pub competition: CompetitiveAnalysis,
}

/// The engine boundary: validated entry points over the pure modules.
///
/// Construction is cheap; the engine owns only its configuration and can be
/// shared behind a reference from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Profitability analysis of one product; never fails, degrades instead.
    pub fn analyze_product(&self, product: &Product) -> ProductAnalysis {
        analysis::analyze_product(&self.config, product)
    }

    /// Bulk analysis; one malformed product never aborts the batch.
    pub fn analyze_catalog(&self, products: &[Product]) -> CatalogAnalysis {
        tracing::debug!(count = products.len(), "analyzing catalog");
        analysis::analyze_catalog(&self.config, products)
    }

    /// Break-even price for a known cost.
    pub fn min_price(
        &self,
        cost_price: Decimal,
        commission_rate: Decimal,
    ) -> Result<SolvedPrice, ValidationError> {
        self.validate_cost(cost_price)?;
        self.validate_rate(commission_rate)?;
        let solved = PriceSolver::new(&self.config).min_price(cost_price, commission_rate);
        if !solved.converged {
            tracing::warn!(
                %cost_price,
                %commission_rate,
                iterations = solved.iterations,
                "price solver did not converge; using last iterate"
            );
        }
        Ok(solved)
    }

    /// Margin-target price for a known cost.
    pub fn recommended_price(
        &self,
        cost_price: Decimal,
        commission_rate: Decimal,
    ) -> Result<SolvedPrice, ValidationError> {
        self.validate_cost(cost_price)?;
        self.validate_rate(commission_rate)?;
        Ok(PriceSolver::new(&self.config).recommended_price(cost_price, commission_rate))
    }

    /// Profit curve across a stepped price range.
    pub fn simulate_prices(
        &self,
        cost_price: Decimal,
        commission_rate: Decimal,
        from: Decimal,
        to: Decimal,
        step: Decimal,
    ) -> Result<Vec<PricePoint>, ValidationError> {
        self.validate_cost(cost_price)?;
        self.validate_rate(commission_rate)?;
        if !step.is_positive() || from > to {
            return Err(ValidationError::InvalidPriceRange);
        }
        Ok(analysis::simulate_prices(
            &self.config,
            cost_price,
            commission_rate,
            from,
            to,
            step,
        ))
    }

    /// Order-line profitability, quantity-scaled.
    pub fn analyze_order_line(
        &self,
        line: &OrderLine,
        cost_price: Option<Decimal>,
    ) -> OrderLineAnalysis {
        analysis::analyze_order_line(&self.config, line, cost_price)
    }

    /// Full pricing strategy; requires a positive sale price and cost.
    pub fn pricing_strategy(
        &self,
        sale_price: Decimal,
        cost_price: Decimal,
        commission_rate: Decimal,
    ) -> Result<PricingStrategy, ValidationError> {
        if !sale_price.is_positive() {
            return Err(ValidationError::InvalidSalePrice);
        }
        self.validate_cost(cost_price)?;
        self.validate_rate(commission_rate)?;
        Ok(strategy::build_strategy(
            &self.config,
            sale_price,
            cost_price,
            commission_rate,
        ))
    }

    /// Title quality plus market position for one listing.
    pub fn research(&self, request: &ResearchRequest) -> Result<ResearchReport, ValidationError> {
        if request.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if !request.sale_price.is_positive() {
            return Err(ValidationError::InvalidSalePrice);
        }
        if let Some(rate) = request.commission_rate {
            self.validate_rate(rate)?;
        }

        tracing::debug!(
            category = %request.category_name,
            competitors = request.competitors.len(),
            "running listing research"
        );

        let competitor_titles: Vec<String> = request
            .competitors
            .iter()
            .filter(|c| !c.title.trim().is_empty())
            .map(|c| c.title.clone())
            .collect();

        let title = title::score_title(
            &self.config.rubric,
            &request.title,
            request.brand.as_deref(),
            &request.category_name,
            &competitor_titles,
        );

        let competition = competition::analyze_competitors(
            &self.config,
            request.sale_price,
            &request.category_name,
            &request.competitors,
            request.cost_price,
            request.commission_rate,
        );

        Ok(ResearchReport {
            category_name: request.category_name.clone(),
            competitor_count: request.competitors.len(),
            title,
            competition,
        })
    }

    fn validate_cost(&self, cost_price: Decimal) -> Result<(), ValidationError> {
        if cost_price.is_positive() {
            Ok(())
        } else {
            Err(ValidationError::MissingCostPrice)
        }
    }

    fn validate_rate(&self, rate: Decimal) -> Result<(), ValidationError> {
        if rate.is_negative() || rate > Decimal::hundred() {
            Err(ValidationError::InvalidCommissionRate(rate))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_min_price_rejects_missing_cost() {
        let engine = Engine::default();
        assert!(matches!(
            engine.min_price(Decimal::zero(), d("20")),
            Err(ValidationError::MissingCostPrice)
        ));
    }

    #[test]
    fn test_min_price_rejects_bad_rate() {
        let engine = Engine::default();
        assert!(matches!(
            engine.min_price(d("50"), d("120")),
            Err(ValidationError::InvalidCommissionRate(_))
        ));
    }

    #[test]
    fn test_research_rejects_empty_title() {
        let engine = Engine::default();
        let request = ResearchRequest {
            title: "   ".to_string(),
            brand: None,
            category_name: "Drinkware".to_string(),
            sale_price: d("100"),
            cost_price: None,
            commission_rate: None,
            competitors: Vec::new(),
        };
        assert!(matches!(
            engine.research(&request),
            Err(ValidationError::MissingTitle)
        ));
    }

    #[test]
    fn test_research_rejects_non_positive_price() {
        let engine = Engine::default();
        let request = ResearchRequest {
            title: "Steel Bottle".to_string(),
            brand: None,
            category_name: "Drinkware".to_string(),
            sale_price: Decimal::zero(),
            cost_price: None,
            commission_rate: None,
            competitors: Vec::new(),
        };
        assert!(matches!(
            engine.research(&request),
            Err(ValidationError::InvalidSalePrice)
        ));
    }

    #[test]
    fn test_simulate_rejects_inverted_range() {
        let engine = Engine::default();
        assert!(matches!(
            engine.simulate_prices(d("50"), d("20"), d("300"), d("100"), d("50")),
            Err(ValidationError::InvalidPriceRange)
        ));
    }
}
