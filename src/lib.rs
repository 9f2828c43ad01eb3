//! Pricing and competitive-intelligence engine for marketplace sellers.
//!
//! Given a product's sale price, cost and commission rate, the engine breaks
//! down marketplace deductions (tiered shipping, commission, platform fee),
//! solves for break-even and margin-target prices, and scores a listing
//! title against live competitor listings with a deterministic replacement
//! suggestion.
//!
//! The crate is a pure library: no I/O, no network, no persistence. The
//! marketplace API, any AI collaborator and the presentation layer are
//! external; they feed plain records in and consume structured results out.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod service;

pub use config::{ConfigError, EngineConfig, FeeSchedule, MarginBand, RubricConfig, ShippingTier};
pub use domain::{
    Barcode, CommissionSource, CompetitorListing, Decimal, Order, OrderLine, Product, TimeMs,
};
pub use engine::{Engine, ResearchReport, ResearchRequest};
pub use error::ValidationError;
pub use service::{CostStore, StoreService};
