mod forecast;
mod portfolio;
mod quote;
mod search;
mod value;

use std::sync::Arc;
use std::time::Instant;

use equitick_core::{Envelope, EnvelopeError, MarketData, ReqwestHttpClient, YahooFinance};
use equitick_store::{PortfolioStore, StoreConfig};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::Metadata;

pub struct CommandResult {
    pub data: Value,
    pub source: String,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value, source: impl Into<String>) -> Self {
        Self {
            data,
            source: source.into(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_error(mut self, error: EnvelopeError) -> Self {
        self.errors.push(error);
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();

    let market: Arc<dyn MarketData> = if cli.mock {
        Arc::new(YahooFinance::offline())
    } else {
        Arc::new(
            YahooFinance::online(Arc::new(ReqwestHttpClient::new()))
                .with_timeout_ms(cli.timeout_ms),
        )
    };

    let result = match &cli.command {
        Command::Search(args) => search::run(args, market.as_ref()).await?,
        Command::Quote(args) => quote::run(args, market.as_ref()).await?,
        Command::Value(args) => value::run(args, market.as_ref()).await?,
        Command::Forecast(args) => forecast::run(args, market.as_ref()).await?,
        Command::Portfolio(args) => {
            let store = open_store(cli).await?;
            portfolio::run(&args.command, &store).await?
        }
    };

    let latency_ms = started.elapsed().as_millis() as u64;
    let mut metadata = Metadata::new(result.source, latency_ms);
    for warning in result.warnings {
        metadata.push_warning(warning);
    }

    Ok(Envelope::with_errors(
        metadata.into_envelope_meta(),
        result.data,
        result.errors,
    ))
}

async fn open_store(cli: &Cli) -> Result<PortfolioStore, CliError> {
    let url = format!("sqlite://{}", cli.db.display());
    Ok(PortfolioStore::open(StoreConfig::new(url)).await?)
}
