use equitick_core::{Bar, UtcDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum bar count required to fit a trend.
pub const MIN_OBSERVATIONS: usize = 30;

/// Two-sided 95% band multiplier on the residual standard deviation.
const BAND_Z: f64 = 1.96;

/// Failures raised while fitting a trend model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error("insufficient history: {observed} bars observed, {required} required")]
    InsufficientHistory { observed: usize, required: usize },
}

/// One projected row of the forecast curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ts: UtcDateTime,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Least-squares linear trend over daily close prices.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendModel {
    intercept: f64,
    slope: f64,
    band: f64,
    last_ts: UtcDateTime,
    observations: usize,
}

impl TrendModel {
    /// Fit a trend over the given bars, oldest first.
    ///
    /// # Errors
    ///
    /// [`ForecastError::InsufficientHistory`] when fewer than
    /// [`MIN_OBSERVATIONS`] bars are supplied.
    pub fn fit(bars: &[Bar]) -> Result<Self, ForecastError> {
        let n = bars.len();
        if n < MIN_OBSERVATIONS {
            return Err(ForecastError::InsufficientHistory {
                observed: n,
                required: MIN_OBSERVATIONS,
            });
        }

        let count = n as f64;
        let mean_x = (count - 1.0) / 2.0;
        let mean_y = bars.iter().map(|bar| bar.close).sum::<f64>() / count;

        let mut covariance = 0.0;
        let mut variance = 0.0;
        for (index, bar) in bars.iter().enumerate() {
            let dx = index as f64 - mean_x;
            covariance += dx * (bar.close - mean_y);
            variance += dx * dx;
        }

        let slope = covariance / variance;
        let intercept = mean_y - slope * mean_x;

        let residual_sq_sum: f64 = bars
            .iter()
            .enumerate()
            .map(|(index, bar)| {
                let fitted = intercept + slope * index as f64;
                let residual = bar.close - fitted;
                residual * residual
            })
            .sum();
        let residual_std = (residual_sq_sum / (count - 2.0)).sqrt();

        Ok(Self {
            intercept,
            slope,
            band: BAND_Z * residual_std,
            last_ts: bars[n - 1].ts,
            observations: n,
        })
    }

    pub const fn slope(&self) -> f64 {
        self.slope
    }

    pub const fn observations(&self) -> usize {
        self.observations
    }

    /// Project the fitted trend forward, one row per day.
    ///
    /// A zero horizon yields an empty curve.
    pub fn project(&self, horizon_days: u32) -> Vec<ForecastPoint> {
        let last_index = (self.observations - 1) as f64;

        (1..=horizon_days as i64)
            .map(|day| {
                let predicted = self.intercept + self.slope * (last_index + day as f64);
                ForecastPoint {
                    ts: self.last_ts.plus_days(day),
                    predicted,
                    lower: predicted - self.band,
                    upper: predicted + self.band,
                }
            })
            .collect()
    }
}

/// Fit-and-project convenience that degrades to an empty curve on failure,
/// matching the collaborator contract the viewers rely on.
pub fn forecast_closes(bars: &[Bar], horizon_days: u32) -> Vec<ForecastPoint> {
    TrendModel::fit(bars)
        .map(|model| model.project(horizon_days))
        .unwrap_or_default()
}
