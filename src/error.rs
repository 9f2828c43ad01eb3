use crate::domain::Decimal;
use thiserror::Error;

/// Validation failures at the caller-facing boundary.
///
/// The engine itself never fails; these are the checks the service layer
/// applies before invoking it, so a malformed entry in a bulk run is rejected
/// (or skipped) with a descriptive reason instead of aborting the batch.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("a positive sale price is required")]
    InvalidSalePrice,
    #[error("a positive cost price is required for this calculation")]
    MissingCostPrice,
    #[error("a product title is required")]
    MissingTitle,
    #[error("commission rate must be in [0, 100], got {0}")]
    InvalidCommissionRate(Decimal),
    #[error("price range is empty or inverted")]
    InvalidPriceRange,
}
