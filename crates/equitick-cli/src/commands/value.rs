use equitick_core::{
    compute_valuation, EnvelopeError, Fundamental, FundamentalsRequest, MarketData, Symbol,
    ValuationAssumptions, ValuationResult,
};
use serde::Serialize;

use crate::cli::ValueArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ValueResponseData {
    symbol: Symbol,
    assumptions: ValuationAssumptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    valuation: Option<ValuationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shares_outstanding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fair_value_per_share: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upside_pct: Option<f64>,
}

pub async fn run(args: &ValueArgs, market: &dyn MarketData) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    // Fundamentals are only fetched when the caller has not overridden both
    // inputs; the engine itself never substitutes defaults.
    let fetched = if args.fcf.is_some() && args.shares.is_some() {
        None
    } else {
        match fetch_fundamental(market, &symbol).await {
            Ok(fundamental) => fundamental,
            Err(error) => {
                let data = serde_json::to_value(UnpricedData {
                    symbol: symbol.clone(),
                })?;
                return Ok(CommandResult::ok(data, market.provider())
                    .with_error(EnvelopeError::from(&error)));
            }
        }
    };

    let free_cash_flow = args
        .fcf
        .or_else(|| fetched.as_ref().and_then(|f| f.free_cash_flow))
        .ok_or_else(|| {
            CliError::Usage(format!(
                "no free cash flow reported for {symbol}; pass --fcf to supply one"
            ))
        })?;
    let shares_outstanding = args
        .shares
        .or_else(|| fetched.as_ref().and_then(|f| f.shares_outstanding))
        .ok_or_else(|| {
            CliError::Usage(format!(
                "no shares outstanding reported for {symbol}; pass --shares to supply them"
            ))
        })?;
    if shares_outstanding <= 0.0 {
        return Err(CliError::Usage(String::from(
            "shares outstanding must be positive",
        )));
    }

    let current_price = fetched.as_ref().and_then(|f| f.current_price);
    let source = if fetched.is_some() {
        market.provider()
    } else {
        "local"
    };

    let assumptions = ValuationAssumptions::new(
        free_cash_flow,
        args.growth,
        args.terminal_growth,
        args.discount,
        args.years,
    )?;

    match compute_valuation(&assumptions) {
        Ok(valuation) => {
            // Fair value per share is the caller's derivation, not the
            // engine's: share count is an external fact.
            let fair_value_per_share = valuation.total_value / shares_outstanding;
            let upside_pct = current_price
                .filter(|price| *price > 0.0)
                .map(|price| (fair_value_per_share - price) / price * 100.0);

            let data = serde_json::to_value(ValueResponseData {
                symbol,
                assumptions,
                valuation: Some(valuation),
                shares_outstanding: Some(shares_outstanding),
                fair_value_per_share: Some(fair_value_per_share),
                current_price,
                upside_pct,
            })?;

            Ok(CommandResult::ok(data, source))
        }
        Err(failure) => {
            let data = serde_json::to_value(ValueResponseData {
                symbol,
                assumptions,
                valuation: None,
                shares_outstanding: Some(shares_outstanding),
                fair_value_per_share: None,
                current_price,
                upside_pct: None,
            })?;

            Ok(CommandResult::ok(data, source).with_error(EnvelopeError::from(&failure)))
        }
    }
}

#[derive(Debug, Serialize)]
struct UnpricedData {
    symbol: Symbol,
}

async fn fetch_fundamental(
    market: &dyn MarketData,
    symbol: &Symbol,
) -> Result<Option<Fundamental>, equitick_core::SourceError> {
    let request = FundamentalsRequest::new(vec![symbol.clone()])?;
    let batch = market.fundamentals(request).await?;
    Ok(batch
        .fundamentals
        .into_iter()
        .find(|fundamental| &fundamental.symbol == symbol))
}
