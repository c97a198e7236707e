//! # Equitick Core
//!
//! Valuation engine and domain contracts for the Equitick toolkit.
//!
//! ## Overview
//!
//! - **Valuation engine**: two-phase discounted-cash-flow computation with
//!   typed business failures ([`valuation`])
//! - **Portfolio allocation** value object and weight-sum validation
//!   ([`portfolio`])
//! - **Canonical domain models** for instruments, quotes, bars, and
//!   fundamentals ([`domain`])
//! - **Market data contract** and the Yahoo Finance adapter
//!   ([`data_source`], [`adapters`])
//! - **Response envelope** with request metadata and structured errors
//!   ([`envelope`])
//!
//! ## Quick Start
//!
//! ```rust
//! use equitick_core::{compute_valuation, ValuationAssumptions};
//!
//! let assumptions = ValuationAssumptions::new(6.9e9, 10.0, 3.0, 10.0, 5)?;
//! let result = compute_valuation(&assumptions)?;
//! assert!(result.total_value > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Construction-time contract violations are [`ValidationError`]s; the
//! engine's two expected business failures are [`ValuationError`] variants
//! so callers are forced to handle both outcomes explicitly; adapter
//! failures are [`SourceError`]s with a stable machine-readable code.
//!
//! ## Security
//!
//! - No credentials are ever logged; Yahoo session state stays in memory
//! - All outbound HTTP goes through the [`http::HttpClient`] seam, so tests
//!   and `--mock` runs never touch the network

pub mod adapters;
pub mod circuit_breaker;
pub mod data_source;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod http;
pub mod portfolio;
pub mod valuation;

pub use adapters::{YahooFinance, YahooSession};

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};

pub use data_source::{
    BarsRequest, FundamentalsBatch, FundamentalsRequest, MarketData, QuoteBatch, QuoteRequest,
    SearchRequest, SearchResults, SourceError, SourceErrorKind, SourceFuture,
};

pub use domain::{
    validate_currency_code, AssetClass, Bar, BarSeries, Fundamental, Instrument, Interval, Quote,
    Symbol, UtcDateTime,
};

pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};

pub use error::{CoreError, ValidationError};

pub use http::{CannedHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use portfolio::{
    validate_weights, AllocationEntry, PortfolioAllocation, WEIGHT_SUM_TOLERANCE,
};

pub use valuation::{
    compute_valuation, DiscountedCashFlow, ValuationAssumptions, ValuationError, ValuationResult,
};
