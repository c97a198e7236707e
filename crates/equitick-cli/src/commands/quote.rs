use equitick_core::{EnvelopeError, MarketData, QuoteRequest, Symbol};
use serde_json::json;

use crate::cli::QuoteArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &QuoteArgs, market: &dyn MarketData) -> Result<CommandResult, CliError> {
    let symbols = args
        .symbols
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let requested = symbols.len();

    let request =
        QuoteRequest::new(symbols).map_err(|error| CliError::Usage(error.to_string()))?;

    match market.quote(request).await {
        Ok(batch) => {
            let returned = batch.quotes.len();
            let data = serde_json::to_value(&batch)?;

            let mut result = CommandResult::ok(data, market.provider());
            if returned < requested {
                result = result.with_warning(format!(
                    "{} of {} requested symbols returned no quote",
                    requested - returned,
                    requested
                ));
            }
            Ok(result)
        }
        Err(error) => {
            let data = json!({ "quotes": [] });
            Ok(CommandResult::ok(data, market.provider())
                .with_error(EnvelopeError::from(&error)))
        }
    }
}
