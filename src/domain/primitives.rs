//! Domain primitives: Barcode, TimeMs, CommissionSource.

use serde::{Deserialize, Serialize};

/// Time in milliseconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeMs(pub i64);

impl TimeMs {
    /// Create a TimeMs from milliseconds.
    pub fn new(ms: i64) -> Self {
        TimeMs(ms)
    }

    /// Get the underlying milliseconds value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Marketplace product identifier (barcode string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Barcode(pub String);

impl Barcode {
    /// Create a Barcode from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Barcode(code.into())
    }

    /// Get the barcode as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Barcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a product's commission rate came from.
///
/// Rates are best-effort: order history is authoritative, the category
/// average is a guess, and the default is a last resort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionSource {
    /// Observed on a past order line for this barcode.
    OrderHistory,
    /// Average of observed rates across the same category.
    CategoryAverage,
    /// No observation available; the configured default was applied.
    Default,
}

impl std::fmt::Display for CommissionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommissionSource::OrderHistory => write!(f, "order_history"),
            CommissionSource::CategoryAverage => write!(f, "category_average"),
            CommissionSource::Default => write!(f, "default"),
        }
    }
}
