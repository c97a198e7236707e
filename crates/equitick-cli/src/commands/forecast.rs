use equitick_core::{BarsRequest, EnvelopeError, Interval, MarketData, Symbol};
use equitick_forecast::{forecast_closes, ForecastPoint, MIN_OBSERVATIONS};
use serde::Serialize;
use serde_json::json;

use crate::cli::ForecastArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ForecastResponseData {
    symbol: Symbol,
    horizon_days: u32,
    observations: usize,
    points: Vec<ForecastPoint>,
}

pub async fn run(args: &ForecastArgs, market: &dyn MarketData) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    let request = BarsRequest::new(symbol.clone(), Interval::OneDay, args.history)
        .map_err(|error| CliError::Usage(error.to_string()))?;

    match market.bars(request).await {
        Ok(series) => {
            let observations = series.bars.len();
            let points = forecast_closes(&series.bars, args.horizon_days);
            let insufficient_history = points.is_empty() && observations < MIN_OBSERVATIONS;

            let data = serde_json::to_value(ForecastResponseData {
                symbol,
                horizon_days: args.horizon_days,
                observations,
                points,
            })?;

            let mut result = CommandResult::ok(data, market.provider());
            if insufficient_history {
                result = result.with_warning(format!(
                    "forecast unavailable: {observations} bars observed, {MIN_OBSERVATIONS} required"
                ));
            }
            Ok(result)
        }
        Err(error) => {
            let data = json!({
                "symbol": symbol,
                "horizon_days": args.horizon_days,
                "observations": 0,
                "points": [],
            });
            Ok(CommandResult::ok(data, market.provider())
                .with_error(EnvelopeError::from(&error)))
        }
    }
}
