//! In-memory cost price store keyed by barcode.
//!
//! Process-lifetime only; durability is explicitly out of scope. The engine
//! never touches this store, it only receives resolved cost values.

use crate::domain::{Barcode, Decimal};
use std::collections::HashMap;

/// Seller-entered cost prices.
///
/// Setting a cost at or below zero removes the entry: "no cost" is absence,
/// not a zero sentinel.
#[derive(Debug, Clone, Default)]
pub struct CostStore {
    costs: HashMap<Barcode, Decimal>,
}

impl CostStore {
    pub fn new() -> Self {
        CostStore::default()
    }

    /// Insert or overwrite a cost; a non-positive value removes the entry.
    pub fn set(&mut self, barcode: Barcode, cost_price: Decimal) {
        if cost_price.is_positive() {
            self.costs.insert(barcode, cost_price);
        } else {
            self.costs.remove(&barcode);
        }
    }

    /// Upsert many entries at once, with the same removal rule per entry.
    pub fn set_bulk(&mut self, entries: impl IntoIterator<Item = (Barcode, Decimal)>) {
        for (barcode, cost_price) in entries {
            self.set(barcode, cost_price);
        }
    }

    pub fn get(&self, barcode: &Barcode) -> Option<Decimal> {
        self.costs.get(barcode).copied()
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Barcode, Decimal)> {
        self.costs.iter().map(|(barcode, cost)| (barcode, *cost))
    }
}
