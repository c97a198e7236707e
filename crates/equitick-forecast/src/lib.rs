//! # Equitick Forecast
//!
//! Price-trend forecasting over historical bars.
//!
//! The model is a deliberately simple linear trend (ordinary least squares
//! over close prices) with a symmetric 95% confidence band derived from the
//! fit residuals. Consumers treat it as a black box returning a curve of
//! `(timestamp, predicted, lower, upper)` rows; the valuation core never
//! inspects this output.

mod trend;

pub use trend::{forecast_closes, ForecastError, ForecastPoint, TrendModel, MIN_OBSERVATIONS};
