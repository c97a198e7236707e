//! Behavior-driven tests for the valuation engine.
//!
//! These exercise the DCF computation the way a caller would, focusing on
//! user-visible outcomes: totals, typed failures, and numeric guarantees.

use equitick_core::{
    compute_valuation, ValidationError, ValuationAssumptions, ValuationError,
};

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

// =============================================================================
// Happy path
// =============================================================================

#[test]
fn when_user_values_a_flat_cash_flow_the_textbook_total_comes_out() {
    // Given: 100 of FCF, no growth anywhere, 10% discount, one explicit year
    let input = assumptions(100.0, 0.0, 0.0, 10.0, 1);

    // When: The valuation runs
    let result = compute_valuation(&input).expect("valuation should succeed");

    // Then: Explicit PV ~90.909, discounted terminal ~909.09, total ~1000
    assert!((result.explicit_value - 100.0 / 1.1).abs() < 1e-9);
    assert!((result.terminal_value_discounted - 1000.0 / 1.1).abs() < 1e-9);
    assert!((result.total_value - 1000.0).abs() < 1e-9);
}

#[test]
fn when_user_requests_a_long_horizon_each_year_is_itemized() {
    let input = assumptions(2.0e9, 8.0, 2.5, 9.5, 10);

    let result = compute_valuation(&input).expect("valuation should succeed");

    assert_eq!(result.yearly.len(), 10);
    for (index, row) in result.yearly.iter().enumerate() {
        assert_eq!(row.year as usize, index + 1);
        assert!(row.discounted.is_finite());
        // Discounting can only shrink a positive cash flow.
        assert!(row.discounted < row.cash_flow);
    }

    assert!(result.total_value.is_finite());
    assert!(result.total_value > 0.0);
}

#[test]
fn when_user_repeats_a_valuation_the_output_is_bit_identical() {
    let input = assumptions(6.93e9, 10.0, 3.0, 10.0, 5);

    let first = compute_valuation(&input).expect("valuation should succeed");
    let second = compute_valuation(&input).expect("valuation should succeed");

    assert_eq!(first.total_value.to_bits(), second.total_value.to_bits());
    assert_eq!(
        first.terminal_value_discounted.to_bits(),
        second.terminal_value_discounted.to_bits()
    );
    assert_eq!(first.yearly, second.yearly);
}

#[test]
fn when_user_raises_the_discount_rate_the_valuation_strictly_drops() {
    // Sweeping WACC upward must monotonically deflate the total.
    let mut previous = f64::INFINITY;
    for discount in [8.0, 9.0, 10.0, 11.0, 12.0] {
        let result = compute_valuation(&assumptions(100.0, 5.0, 2.0, discount, 5))
            .expect("valuation should succeed");
        assert!(result.total_value < previous);
        previous = result.total_value;
    }
}

// =============================================================================
// Typed failures
// =============================================================================

#[test]
fn when_terminal_growth_equals_discount_rate_the_engine_refuses() {
    let err = compute_valuation(&assumptions(100.0, 5.0, 10.0, 10.0, 5))
        .expect_err("perpetuity must be rejected");

    assert!(matches!(err, ValuationError::InvalidAssumptions { .. }));
    assert_eq!(err.code(), "valuation.invalid_assumptions");
}

#[test]
fn when_terminal_growth_exceeds_discount_rate_the_engine_refuses() {
    let err = compute_valuation(&assumptions(100.0, 5.0, 15.0, 10.0, 5))
        .expect_err("divergent perpetuity must be rejected");

    assert!(matches!(err, ValuationError::InvalidAssumptions { .. }));
}

#[test]
fn when_cash_flow_compounds_negative_the_terminal_phase_refuses() {
    // Growth keeps a distressed FCF negative through every horizon length.
    for years in [1, 3, 10] {
        let err = compute_valuation(&assumptions(-50.0, 10.0, 2.0, 8.0, years))
            .expect_err("negative terminal base must be rejected");

        assert!(matches!(
            err,
            ValuationError::NegativeTerminalCashFlow { final_year_fcf } if final_year_fcf < 0.0
        ));
        assert_eq!(err.code(), "valuation.negative_terminal_cash_flow");
    }
}

#[test]
fn when_assumption_order_matters_the_rate_check_wins() {
    // Both failure conditions hold; the rate invariant is checked first,
    // before any projection happens.
    let err = compute_valuation(&assumptions(-50.0, 10.0, 12.0, 10.0, 5))
        .expect_err("must fail");
    assert!(matches!(err, ValuationError::InvalidAssumptions { .. }));
}

// =============================================================================
// Construction guards
// =============================================================================

#[test]
fn when_user_supplies_zero_forecast_years_construction_fails() {
    let err = ValuationAssumptions::new(100.0, 5.0, 2.0, 10.0, 0).expect_err("must fail");
    assert!(matches!(err, ValidationError::EmptyForecastPeriod));
}

#[test]
fn when_user_supplies_non_finite_inputs_construction_fails() {
    let err =
        ValuationAssumptions::new(f64::INFINITY, 5.0, 2.0, 10.0, 5).expect_err("must fail");
    assert!(matches!(
        err,
        ValidationError::NonFiniteValue {
            field: "initial_free_cash_flow"
        }
    ));
}
