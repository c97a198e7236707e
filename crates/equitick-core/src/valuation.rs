//! Discounted-cash-flow valuation engine.
//!
//! A two-phase DCF: an explicit forecast period compounding free cash flow
//! at a single growth rate, followed by a Gordon-growth terminal value.
//! `compute_valuation` is a pure function of its inputs — no I/O, no shared
//! state, deterministic down to the bit for identical assumptions.
//!
//! All rates are percentages (`10.0` means 10%) and are divided by 100
//! internally; callers must not pre-convert to fractions. No rounding is
//! applied anywhere — presentation formatting is the caller's business.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ValidationError;

/// Business-rule failures raised by the valuation engine.
///
/// Both variants are caller input errors, surfaced synchronously and never
/// recovered from inside the engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValuationError {
    /// A Gordon-growth perpetuity diverges when terminal growth reaches the
    /// discount rate.
    #[error(
        "terminal growth must be less than discount rate \
         (terminal {terminal_growth_pct}%, discount {discount_rate_pct}%)"
    )]
    InvalidAssumptions {
        terminal_growth_pct: f64,
        discount_rate_pct: f64,
    },

    /// The last projected explicit-period cash flow is negative, so the
    /// perpetuity formula has no meaningful base year. The engine refuses
    /// rather than returning a misleading number.
    #[error("terminal value calculation invalid: final projected cash flow is {final_year_fcf}")]
    NegativeTerminalCashFlow { final_year_fcf: f64 },
}

impl ValuationError {
    /// Stable machine-readable code for envelope errors.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidAssumptions { .. } => "valuation.invalid_assumptions",
            Self::NegativeTerminalCashFlow { .. } => "valuation.negative_terminal_cash_flow",
        }
    }
}

/// Immutable valuation inputs.
///
/// Constructed once per request and never mutated. `initial_free_cash_flow`
/// may be negative for distressed companies; whether the valuation succeeds
/// then depends on where growth takes the final projected year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationAssumptions {
    pub initial_free_cash_flow: f64,
    pub growth_rate_pct: f64,
    pub terminal_growth_rate_pct: f64,
    pub discount_rate_pct: f64,
    pub forecast_years: u32,
}

impl ValuationAssumptions {
    pub fn new(
        initial_free_cash_flow: f64,
        growth_rate_pct: f64,
        terminal_growth_rate_pct: f64,
        discount_rate_pct: f64,
        forecast_years: u32,
    ) -> Result<Self, ValidationError> {
        validate_finite("initial_free_cash_flow", initial_free_cash_flow)?;
        validate_finite("growth_rate_pct", growth_rate_pct)?;
        validate_finite("terminal_growth_rate_pct", terminal_growth_rate_pct)?;
        validate_finite("discount_rate_pct", discount_rate_pct)?;

        if forecast_years == 0 {
            return Err(ValidationError::EmptyForecastPeriod);
        }

        Ok(Self {
            initial_free_cash_flow,
            growth_rate_pct,
            terminal_growth_rate_pct,
            discount_rate_pct,
            forecast_years,
        })
    }
}

/// One projected year of the explicit forecast period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountedCashFlow {
    /// 1-indexed forecast year.
    pub year: u32,
    /// Undiscounted projected cash flow for the year.
    pub cash_flow: f64,
    /// The same cash flow discounted back to present value.
    pub discounted: f64,
}

/// Valuation output: totals plus the per-year diagnostic trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Sum of discounted explicit-period cash flows.
    pub explicit_value: f64,
    /// Terminal value discounted back to present value.
    pub terminal_value_discounted: f64,
    /// `explicit_value + terminal_value_discounted`.
    pub total_value: f64,
    pub yearly: Vec<DiscountedCashFlow>,
}

/// Run the two-phase DCF over the given assumptions.
///
/// Fair value per share is deliberately NOT derived here: shares outstanding
/// is an external fact, so the division belongs to the caller.
///
/// # Errors
///
/// - [`ValuationError::InvalidAssumptions`] when terminal growth is not
///   strictly below the discount rate (checked before any computation).
/// - [`ValuationError::NegativeTerminalCashFlow`] when the final projected
///   explicit-period cash flow is negative.
pub fn compute_valuation(
    assumptions: &ValuationAssumptions,
) -> Result<ValuationResult, ValuationError> {
    if assumptions.terminal_growth_rate_pct >= assumptions.discount_rate_pct {
        return Err(ValuationError::InvalidAssumptions {
            terminal_growth_pct: assumptions.terminal_growth_rate_pct,
            discount_rate_pct: assumptions.discount_rate_pct,
        });
    }

    let growth_factor = 1.0 + assumptions.growth_rate_pct / 100.0;
    let discount_factor = 1.0 + assumptions.discount_rate_pct / 100.0;

    let mut cash_flow = assumptions.initial_free_cash_flow;
    let mut explicit_value = 0.0;
    let mut yearly = Vec::with_capacity(assumptions.forecast_years as usize);

    for year in 1..=assumptions.forecast_years {
        cash_flow *= growth_factor;
        let discounted = cash_flow / discount_factor.powi(year as i32);
        explicit_value += discounted;
        yearly.push(DiscountedCashFlow {
            year,
            cash_flow,
            discounted,
        });
    }

    // The perpetuity assumes a going concern with positive normalized cash
    // flow; a negative base year has no meaningful terminal value.
    let final_year_fcf = cash_flow;
    if final_year_fcf < 0.0 {
        return Err(ValuationError::NegativeTerminalCashFlow { final_year_fcf });
    }

    let terminal_growth = assumptions.terminal_growth_rate_pct / 100.0;
    let discount_rate = assumptions.discount_rate_pct / 100.0;
    let terminal_value =
        final_year_fcf * (1.0 + terminal_growth) / (discount_rate - terminal_growth);
    let terminal_value_discounted =
        terminal_value / discount_factor.powi(assumptions.forecast_years as i32);

    Ok(ValuationResult {
        explicit_value,
        terminal_value_discounted,
        total_value: explicit_value + terminal_value_discounted,
        yearly,
    })
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assumptions(
        fcf: f64,
        growth: f64,
        terminal: f64,
        discount: f64,
        years: u32,
    ) -> ValuationAssumptions {
        ValuationAssumptions::new(fcf, growth, terminal, discount, years)
            .expect("assumptions should validate")
    }

    #[test]
    fn flat_single_year_case_totals_one_thousand() {
        // 100 flat for one year at 10% discount: explicit = 100/1.1,
        // terminal = 100/0.10 discounted one year.
        let result = compute_valuation(&assumptions(100.0, 0.0, 0.0, 10.0, 1))
            .expect("valuation should succeed");

        assert!((result.yearly[0].discounted - 90.909_090_909_090_92).abs() < 1e-9);
        assert!((result.terminal_value_discounted - 909.090_909_090_909_1).abs() < 1e-9);
        assert!((result.total_value - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn records_one_diagnostic_row_per_forecast_year() {
        let result = compute_valuation(&assumptions(50.0, 5.0, 2.0, 9.0, 7))
            .expect("valuation should succeed");

        assert_eq!(result.yearly.len(), 7);
        assert_eq!(result.yearly[0].year, 1);
        assert_eq!(result.yearly[6].year, 7);

        let explicit_sum: f64 = result.yearly.iter().map(|row| row.discounted).sum();
        assert_eq!(explicit_sum, result.explicit_value);
    }

    #[test]
    fn equal_terminal_and_discount_rates_are_rejected() {
        let err = compute_valuation(&assumptions(100.0, 5.0, 10.0, 10.0, 5))
            .expect_err("must fail");
        assert!(matches!(err, ValuationError::InvalidAssumptions { .. }));
    }

    #[test]
    fn terminal_growth_above_discount_rate_is_rejected() {
        let err = compute_valuation(&assumptions(100.0, 5.0, 12.0, 10.0, 5))
            .expect_err("must fail");
        assert!(matches!(err, ValuationError::InvalidAssumptions { .. }));
    }

    #[test]
    fn compounding_negative_cash_flow_fails_terminal_phase() {
        let err = compute_valuation(&assumptions(-50.0, 10.0, 2.0, 8.0, 5))
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValuationError::NegativeTerminalCashFlow { final_year_fcf } if final_year_fcf < 0.0
        ));
    }

    #[test]
    fn negative_start_that_turns_positive_is_valid() {
        // -200% growth flips the sign in year one, so the terminal base is
        // positive even though the starting cash flow was not.
        let result = compute_valuation(&assumptions(-50.0, -200.0, 2.0, 10.0, 1))
            .expect("valuation should succeed");
        assert!(result.yearly[0].cash_flow > 0.0);
        assert!(result.total_value > 0.0);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let input = assumptions(123.456, 7.8, 2.1, 9.3, 6);
        let first = compute_valuation(&input).expect("valuation should succeed");
        let second = compute_valuation(&input).expect("valuation should succeed");

        assert_eq!(first.total_value.to_bits(), second.total_value.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn higher_discount_rate_strictly_lowers_total_value() {
        let cheap_capital = compute_valuation(&assumptions(100.0, 5.0, 2.0, 8.0, 5))
            .expect("valuation should succeed");
        let dear_capital = compute_valuation(&assumptions(100.0, 5.0, 2.0, 12.0, 5))
            .expect("valuation should succeed");

        assert!(dear_capital.total_value < cheap_capital.total_value);
    }

    #[test]
    fn zero_forecast_years_is_rejected_at_construction() {
        let err = ValuationAssumptions::new(100.0, 5.0, 2.0, 10.0, 0).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyForecastPeriod));
    }

    #[test]
    fn non_finite_rate_is_rejected_at_construction() {
        let err = ValuationAssumptions::new(100.0, f64::NAN, 2.0, 10.0, 5).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonFiniteValue { .. }));
    }
}
