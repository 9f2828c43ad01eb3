//! Store-level service layer around the pure engine.
//!
//! Owns the only mutable state in the system (the [`CostStore`]) and wires
//! order history, cost entries and catalog listings into engine calls. The
//! engine itself never sees the store; it receives resolved values.

pub mod commission;
pub mod cost_store;
pub mod sales;
pub mod tariffs;

pub use commission::{category_averages, rates_from_orders, resolve_rate};
pub use cost_store::CostStore;
pub use sales::{sales_report, SaleLine, SalesReport, SalesSummary};
pub use tariffs::{ObservedRate, PriceDropScenario, TariffAnalysis, TariffScenario};

use crate::domain::{Barcode, Decimal, Order, Product, TimeMs};
use crate::engine::{CatalogAnalysis, Engine};

/// Service facade for one seller's store.
pub struct StoreService {
    engine: Engine,
    costs: CostStore,
}

impl StoreService {
    pub fn new(engine: Engine) -> Self {
        StoreService {
            engine,
            costs: CostStore::new(),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn costs(&self) -> &CostStore {
        &self.costs
    }

    /// Record or clear a seller-entered cost.
    pub fn set_cost(&mut self, barcode: Barcode, cost_price: Decimal) {
        self.costs.set(barcode, cost_price);
    }

    /// Bulk cost upsert.
    pub fn set_costs(&mut self, entries: impl IntoIterator<Item = (Barcode, Decimal)>) {
        self.costs.set_bulk(entries);
    }

    /// Attach resolved commission rates and stored costs to raw catalog
    /// listings.
    pub fn enrich_listings(&self, listings: Vec<Product>, orders: &[Order]) -> Vec<Product> {
        let rates = commission::rates_from_orders(orders);
        let averages = commission::category_averages(&listings, &rates);
        tracing::debug!(
            listings = listings.len(),
            observed_rates = rates.len(),
            "enriching catalog listings"
        );

        listings
            .into_iter()
            .map(|mut product| {
                let (rate, source) =
                    commission::resolve_rate(self.engine.config(), &product, &rates, &averages);
                product.commission_rate = rate;
                product.commission_source = source;
                if product.cost_price.is_none() {
                    product.cost_price = self.costs.get(&product.barcode);
                }
                product
            })
            .collect()
    }

    /// Enrich and bulk-analyze the whole catalog.
    pub fn analyze_store(&self, listings: Vec<Product>, orders: &[Order]) -> CatalogAnalysis {
        let enriched = self.enrich_listings(listings, orders);
        self.engine.analyze_catalog(&enriched)
    }

    /// Period sales report with stored costs applied.
    pub fn sales_report(&self, orders: &[Order], from: TimeMs, to: TimeMs) -> SalesReport {
        sales::sales_report(self.engine.config(), &self.costs, orders, from, to)
    }

    /// Commission tariff scenarios for one product against order history.
    pub fn tariff_analysis(&self, product: &Product, orders: &[Order]) -> Option<TariffAnalysis> {
        let mut product = product.clone();
        if product.cost_price.is_none() {
            product.cost_price = self.costs.get(&product.barcode);
        }
        tariffs::tariff_analysis(self.engine.config(), &product, orders)
    }
}
