//! Domain types for the pricing and competitive-intelligence engine.
//!
//! This module provides:
//! - Lossless money handling via the Decimal wrapper
//! - Domain primitives: Barcode, TimeMs, CommissionSource
//! - Product, CompetitorListing and Order records with serde derives

pub mod decimal;
pub mod order;
pub mod primitives;
pub mod product;

pub use decimal::Decimal;
pub use order::{Order, OrderLine};
pub use primitives::{Barcode, CommissionSource, TimeMs};
pub use product::{CompetitorListing, Product};
