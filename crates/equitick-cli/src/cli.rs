//! CLI argument definitions for Equitick.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | Resolve a company name to ticker symbols |
//! | `quote` | Fetch latest prices for symbols |
//! | `value` | Run a DCF valuation and derive fair value per share |
//! | `forecast` | Project a price-trend curve with confidence bands |
//! | `portfolio` | Create, list, and delete named portfolios |
//!
//! # Examples
//!
//! ```bash
//! # Resolve a ticker
//! equitick search "netflix"
//!
//! # Value a company with explicit assumptions
//! equitick value NFLX --growth 10 --terminal-growth 3 --discount 10 --years 5
//!
//! # Save a portfolio
//! equitick portfolio create growth --allocation NFLX=60 --allocation MSFT=40
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Equitick - intrinsic value estimation and portfolio tracking
///
/// Estimates fair equity value from projected free cash flows, tracks
/// multi-asset portfolios, and projects price-trend forecasts, with
/// structured JSON output for scripting.
#[derive(Debug, Parser)]
#[command(
    name = "equitick",
    author,
    version,
    about = "DCF valuation, portfolio tracking, and price forecasts"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Use deterministic offline market data instead of live API calls.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Portfolio database location.
    #[arg(long, global = true, default_value = "equitick.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Human-oriented key/value rendering.
    Table,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a company name to ticker symbols.
    Search(SearchArgs),
    /// Fetch the latest quotes for one or more symbols.
    Quote(QuoteArgs),
    /// Run a DCF valuation for a symbol.
    Value(ValueArgs),
    /// Project a price-trend forecast for a symbol.
    Forecast(ForecastArgs),
    /// Manage named portfolios.
    Portfolio(PortfolioArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text company or ticker query.
    pub query: String,

    /// Maximum number of matches to return.
    #[arg(long, default_value_t = 8)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Ticker symbols to quote.
    #[arg(required = true)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ValueArgs {
    /// Ticker symbol to value.
    pub symbol: String,

    /// Growth rate (%) applied each explicit forecast year.
    #[arg(long, default_value_t = 10.0)]
    pub growth: f64,

    /// Perpetuity growth rate (%) beyond the forecast horizon.
    #[arg(long = "terminal-growth", default_value_t = 3.0)]
    pub terminal_growth: f64,

    /// Discount rate / WACC (%).
    #[arg(long, default_value_t = 10.0)]
    pub discount: f64,

    /// Explicit forecast period length in years.
    #[arg(long, default_value_t = 5)]
    pub years: u32,

    /// Override the reported free cash flow.
    #[arg(long)]
    pub fcf: Option<f64>,

    /// Override the reported shares outstanding.
    #[arg(long)]
    pub shares: Option<f64>,
}

#[derive(Debug, Args)]
pub struct ForecastArgs {
    /// Ticker symbol to forecast.
    pub symbol: String,

    /// Forecast horizon in days.
    #[arg(long = "horizon-days", default_value_t = 365)]
    pub horizon_days: u32,

    /// How many daily bars of history to fit against.
    #[arg(long, default_value_t = 1250)]
    pub history: usize,
}

#[derive(Debug, Args)]
pub struct PortfolioArgs {
    #[command(subcommand)]
    pub command: PortfolioCommand,
}

#[derive(Debug, Subcommand)]
pub enum PortfolioCommand {
    /// Save a new named portfolio.
    Create(PortfolioCreateArgs),
    /// List stored portfolios.
    List,
    /// Delete a portfolio by id.
    Delete(PortfolioDeleteArgs),
}

#[derive(Debug, Args)]
pub struct PortfolioCreateArgs {
    /// Unique portfolio name.
    pub name: String,

    /// Allocation entries as SYMBOL=WEIGHT, weights in percent.
    ///
    /// Repeat the flag per asset; weights must sum to 100.
    #[arg(long = "allocation", required = true)]
    pub allocations: Vec<String>,
}

#[derive(Debug, Args)]
pub struct PortfolioDeleteArgs {
    /// Portfolio record id (UUID from `portfolio list`).
    pub id: String,
}
