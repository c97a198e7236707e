use equitick_core::{EnvelopeError, MarketData, SearchRequest};
use serde_json::json;

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &SearchArgs, market: &dyn MarketData) -> Result<CommandResult, CliError> {
    let request = SearchRequest::new(args.query.clone(), args.limit)
        .map_err(|error| CliError::Usage(error.to_string()))?;

    match market.search(request).await {
        Ok(results) => {
            let empty = results.results.is_empty();
            let data = serde_json::to_value(&results)?;

            let mut result = CommandResult::ok(data, market.provider());
            if empty {
                result = result.with_warning(format!(
                    "no instruments matched '{}'; try a different spelling",
                    args.query
                ));
            }
            Ok(result)
        }
        Err(error) => {
            let data = json!({ "query": args.query, "results": [] });
            Ok(CommandResult::ok(data, market.provider())
                .with_error(EnvelopeError::from(&error)))
        }
    }
}
