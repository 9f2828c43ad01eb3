//! Product and competitor listing records.

use crate::domain::{Barcode, CommissionSource, Decimal};
use serde::{Deserialize, Serialize};

/// A seller's own product as the engine sees it.
///
/// `cost_price` is `None` when the seller has not entered a cost; a product
/// with a genuinely free cost basis carries `Some(0)`. The two are distinct
/// on purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub barcode: Barcode,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_code: Option<String>,
    pub category_name: String,
    pub sale_price: Decimal,
    /// Pre-discount list price; never below `sale_price`.
    pub list_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<Decimal>,
    /// Commission percentage in [0, 100].
    pub commission_rate: Decimal,
    pub commission_source: CommissionSource,
}

impl Product {
    /// Create a Product with the mandatory fields; list price defaults to the
    /// sale price and the commission rate to zero until resolved.
    pub fn new(barcode: Barcode, title: impl Into<String>, sale_price: Decimal) -> Self {
        Product {
            barcode,
            title: title.into(),
            brand: None,
            stock_code: None,
            category_name: String::new(),
            sale_price,
            list_price: sale_price,
            cost_price: None,
            commission_rate: Decimal::zero(),
            commission_source: CommissionSource::Default,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_stock_code(mut self, stock_code: impl Into<String>) -> Self {
        self.stock_code = Some(stock_code.into());
        self
    }

    pub fn with_category(mut self, category_name: impl Into<String>) -> Self {
        self.category_name = category_name.into();
        self
    }

    pub fn with_list_price(mut self, list_price: Decimal) -> Self {
        self.list_price = list_price.max(self.sale_price);
        self
    }

    pub fn with_cost(mut self, cost_price: Decimal) -> Self {
        self.cost_price = Some(cost_price);
        self
    }

    pub fn with_commission(mut self, rate: Decimal, source: CommissionSource) -> Self {
        self.commission_rate = rate;
        self.commission_source = source;
        self
    }
}

/// A competing listing from the same category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorListing {
    pub title: String,
    pub brand: String,
    pub sale_price: Decimal,
    /// Pre-discount list price; clamped to at least `sale_price` at
    /// construction so the discount invariant holds.
    pub list_price: Decimal,
}

impl CompetitorListing {
    pub fn new(
        title: impl Into<String>,
        brand: impl Into<String>,
        sale_price: Decimal,
        list_price: Decimal,
    ) -> Self {
        CompetitorListing {
            title: title.into(),
            brand: brand.into(),
            sale_price,
            list_price: list_price.max(sale_price),
        }
    }

    /// True when the listing is currently discounted.
    pub fn has_discount(&self) -> bool {
        self.list_price > self.sale_price
    }

    /// Discount as a whole percentage of the list price; zero when not
    /// discounted.
    pub fn discount_pct(&self) -> Decimal {
        if !self.has_discount() || !self.list_price.is_positive() {
            return Decimal::zero();
        }
        ((self.list_price - self.sale_price) / self.list_price * Decimal::hundred()).round_whole()
    }
}
