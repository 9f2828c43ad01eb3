//! Fixed-point price solver.
//!
//! Inverts the deduction model: "what sale price yields net profit = target,
//! given cost and commission rate?" There is no closed form because the
//! shipping cost is a step function of the very price being solved for, so
//! the solver iterates
//!
//! `price' = (cost + platform_fee + shipping(price) + target) / (1 - rate/100)`
//!
//! until two iterates agree to within one currency sub-unit. The shipping
//! step function is constant within a tier, so once an iterate lands in the
//! tier of the true fixed point the next pass reproduces it exactly; the
//! iteration cap only guards oscillation across tier boundaries.

use crate::config::EngineConfig;
use crate::domain::Decimal;
use crate::engine::deductions::DeductionModel;
use serde::{Deserialize, Serialize};

/// Iteration budget for the fixed-point loop.
pub const MAX_ITERATIONS: u32 = 15;

/// A solved price with its convergence status.
///
/// `converged == false` means the iteration budget ran out and `price` is the
/// last iterate, ceiled; callers decide whether that is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolvedPrice {
    pub price: Decimal,
    pub converged: bool,
    pub iterations: u32,
}

/// Solves for break-even and margin-target prices over a fee schedule.
#[derive(Debug, Clone, Copy)]
pub struct PriceSolver<'a> {
    config: &'a EngineConfig,
}

impl<'a> PriceSolver<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        PriceSolver { config }
    }

    /// Convergence tolerance: one currency sub-unit.
    fn tolerance() -> Decimal {
        Decimal::from_cents(1)
    }

    /// Break-even price: net profit exactly covers `cost_price`.
    pub fn min_price(&self, cost_price: Decimal, commission_rate: Decimal) -> SolvedPrice {
        self.solve(cost_price, commission_rate, Decimal::zero())
    }

    /// Price hitting the cost-banded target margin for `cost_price`.
    pub fn recommended_price(&self, cost_price: Decimal, commission_rate: Decimal) -> SolvedPrice {
        let target = cost_price * self.config.ideal_margin(cost_price);
        self.solve(cost_price, commission_rate, target)
    }

    /// Solve for the price where net profit equals `target_profit`.
    ///
    /// The seed ignores shipping; see [`Self::solve_with_seed`].
    pub fn solve(
        &self,
        cost_price: Decimal,
        commission_rate: Decimal,
        target_profit: Decimal,
    ) -> SolvedPrice {
        let seed = cost_price + self.config.fees.platform_fee + target_profit;
        self.solve_with_seed(seed, cost_price, commission_rate, target_profit)
    }

    /// Fixed-point iteration from an explicit seed.
    ///
    /// Re-solving with an already-converged price as the seed reproduces that
    /// price.
    pub fn solve_with_seed(
        &self,
        seed: Decimal,
        cost_price: Decimal,
        commission_rate: Decimal,
        target_profit: Decimal,
    ) -> SolvedPrice {
        let model = DeductionModel::new(&self.config.fees);
        let base = cost_price + self.config.fees.platform_fee + target_profit;
        let divisor = Decimal::one() - commission_rate / Decimal::hundred();

        // A rate >= 100 cannot be inverted; hand back the seed unconverged
        // rather than divide by a non-positive factor.
        if !divisor.is_positive() {
            return SolvedPrice {
                price: seed.ceil_to_cents(),
                converged: false,
                iterations: 0,
            };
        }

        let mut price = seed;
        let mut converged = false;
        let mut iterations = 0;

        for _ in 0..MAX_ITERATIONS {
            iterations += 1;
            let shipping = model.shipping_cost(price);
            let next = (base + shipping) / divisor;
            if (next - price).abs() < Self::tolerance() {
                converged = true;
                break;
            }
            price = next;
        }

        SolvedPrice {
            price: price.ceil_to_cents(),
            converged,
            iterations,
        }
    }
}
