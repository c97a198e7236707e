use equitick_core::{
    validate_weights, AllocationEntry, EnvelopeError, PortfolioAllocation, Symbol,
};
use equitick_store::{PortfolioStore, StoreError};
use serde::Serialize;
use serde_json::json;

use crate::cli::{PortfolioCommand, PortfolioCreateArgs, PortfolioDeleteArgs};
use crate::error::CliError;

use super::CommandResult;

pub async fn run(
    command: &PortfolioCommand,
    store: &PortfolioStore,
) -> Result<CommandResult, CliError> {
    match command {
        PortfolioCommand::Create(args) => create(args, store).await,
        PortfolioCommand::List => list(store).await,
        PortfolioCommand::Delete(args) => delete(args, store).await,
    }
}

async fn create(
    args: &PortfolioCreateArgs,
    store: &PortfolioStore,
) -> Result<CommandResult, CliError> {
    let entries = args
        .allocations
        .iter()
        .map(|raw| parse_allocation_arg(raw))
        .collect::<Result<Vec<_>, _>>()?;

    // Reject unbalanced weights before any persistence work.
    let weights: Vec<f64> = entries.iter().map(|entry| entry.weight_pct).collect();
    if !validate_weights(&weights) {
        return Err(CliError::Usage(format!(
            "portfolio weights must sum to 100% (got {:.2}%)",
            weights.iter().sum::<f64>()
        )));
    }

    let allocation = PortfolioAllocation::new(entries)?;

    match store.save(&args.name, &allocation).await {
        Ok(record) => Ok(CommandResult::ok(serde_json::to_value(&record)?, "local")),
        Err(conflict @ StoreError::DuplicateName { .. }) => {
            let data = json!({ "name": args.name });
            Ok(CommandResult::ok(data, "local")
                .with_error(EnvelopeError::new(conflict.code(), conflict.to_string())))
        }
        Err(other) => Err(CliError::from(other)),
    }
}

#[derive(Debug, Serialize)]
struct PortfolioListData {
    portfolios: Vec<equitick_store::PortfolioRecord>,
}

async fn list(store: &PortfolioStore) -> Result<CommandResult, CliError> {
    let portfolios = store.list().await?;
    let empty = portfolios.is_empty();
    let data = serde_json::to_value(PortfolioListData { portfolios })?;

    let mut result = CommandResult::ok(data, "local");
    if empty {
        result = result.with_warning("no portfolios stored yet");
    }
    Ok(result)
}

async fn delete(
    args: &PortfolioDeleteArgs,
    store: &PortfolioStore,
) -> Result<CommandResult, CliError> {
    match store.delete(&args.id).await {
        Ok(()) => {
            let data = json!({ "deleted": args.id });
            Ok(CommandResult::ok(data, "local"))
        }
        Err(missing @ StoreError::NotFound { .. }) => {
            let data = json!({ "deleted": serde_json::Value::Null });
            Ok(CommandResult::ok(data, "local")
                .with_error(EnvelopeError::new(missing.code(), missing.to_string())))
        }
        Err(other) => Err(CliError::from(other)),
    }
}

fn parse_allocation_arg(raw: &str) -> Result<AllocationEntry, CliError> {
    let (symbol_raw, weight_raw) = raw.split_once('=').ok_or_else(|| {
        CliError::Usage(format!(
            "allocation '{raw}' must look like SYMBOL=WEIGHT (e.g. NFLX=60)"
        ))
    })?;

    let symbol = Symbol::parse(symbol_raw)?;
    let weight_pct: f64 = weight_raw.trim().parse().map_err(|_| {
        CliError::Usage(format!("allocation weight '{weight_raw}' is not a number"))
    })?;

    AllocationEntry::new(symbol, weight_pct).map_err(CliError::from)
}
