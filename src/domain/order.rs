//! Marketplace order records used for commission mining and sales reporting.

use crate::domain::{Barcode, Decimal, TimeMs};
use serde::{Deserialize, Serialize};

/// A single line of a marketplace order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub barcode: Barcode,
    pub product_name: String,
    /// Actual per-unit amount charged to the buyer.
    pub unit_price: Decimal,
    /// Pre-discount per-unit price.
    pub list_price: Decimal,
    pub quantity: u32,
    /// Commission percentage the marketplace applied to this line, when the
    /// order feed reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl OrderLine {
    pub fn new(barcode: Barcode, product_name: impl Into<String>, unit_price: Decimal) -> Self {
        OrderLine {
            barcode,
            product_name: product_name.into(),
            unit_price,
            list_price: unit_price,
            quantity: 1,
            commission_rate: None,
            status: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    pub fn with_commission_rate(mut self, rate: Decimal) -> Self {
        self.commission_rate = Some(rate);
        self
    }

    pub fn with_list_price(mut self, list_price: Decimal) -> Self {
        self.list_price = list_price.max(self.unit_price);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A marketplace order: a timestamp plus its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_number: String,
    pub order_date: TimeMs,
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn new(order_number: impl Into<String>, order_date: TimeMs, lines: Vec<OrderLine>) -> Self {
        Order {
            order_number: order_number.into(),
            order_date,
            lines,
        }
    }
}
