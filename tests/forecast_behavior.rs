//! Behavior-driven tests for the price-trend forecast collaborator.

use equitick_core::{BarsRequest, Interval, MarketData, Symbol, YahooFinance};
use equitick_forecast::{forecast_closes, ForecastError, TrendModel, MIN_OBSERVATIONS};

#[tokio::test]
async fn when_user_forecasts_real_looking_history_a_banded_curve_comes_back() {
    // Given: 250 daily bars from the deterministic adapter
    let adapter = YahooFinance::offline();
    let series = adapter
        .bars(
            BarsRequest::new(
                Symbol::parse("NFLX").expect("symbol"),
                Interval::OneDay,
                250,
            )
            .expect("request"),
        )
        .await
        .expect("bars should succeed");

    // When: A trend is fitted and projected 30 days out
    let model = TrendModel::fit(&series.bars).expect("fit should succeed");
    let curve = model.project(30);

    // Then: One row per day, each with a band straddling the prediction
    assert_eq!(curve.len(), 30);
    for point in &curve {
        assert!(point.lower <= point.predicted);
        assert!(point.predicted <= point.upper);
        assert!(point.predicted.is_finite());
    }

    // The offline series drifts upward, so the fitted slope must too.
    assert!(model.slope() > 0.0);
    assert!(curve.windows(2).all(|pair| pair[0].ts < pair[1].ts));
}

#[tokio::test]
async fn when_history_is_too_short_the_curve_degrades_to_empty() {
    let adapter = YahooFinance::offline();
    let series = adapter
        .bars(
            BarsRequest::new(
                Symbol::parse("TSLA").expect("symbol"),
                Interval::OneDay,
                MIN_OBSERVATIONS - 1,
            )
            .expect("request"),
        )
        .await
        .expect("bars should succeed");

    // The typed error names both counts...
    let err = TrendModel::fit(&series.bars).expect_err("must fail");
    assert_eq!(
        err,
        ForecastError::InsufficientHistory {
            observed: MIN_OBSERVATIONS - 1,
            required: MIN_OBSERVATIONS,
        }
    );

    // ...and the convenience entry point degrades to an empty result, the
    // contract the forecast viewers rely on.
    assert!(forecast_closes(&series.bars, 365).is_empty());
}

#[tokio::test]
async fn when_the_same_history_is_fitted_twice_the_curves_match() {
    let adapter = YahooFinance::offline();
    let request = || {
        BarsRequest::new(
            Symbol::parse("MSFT").expect("symbol"),
            Interval::OneDay,
            180,
        )
        .expect("request")
    };

    let first_series = adapter.bars(request()).await.expect("bars");
    let second_series = adapter.bars(request()).await.expect("bars");

    let first = forecast_closes(&first_series.bars, 60);
    let second = forecast_closes(&second_series.bars, 60);

    assert_eq!(first.len(), 60);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.predicted.to_bits(), b.predicted.to_bits());
        assert_eq!(a.lower.to_bits(), b.lower.to_bits());
        assert_eq!(a.upper.to_bits(), b.upper.to_bits());
    }
}
