//! Market data contract and request/response types.
//!
//! The valuation engine itself never fetches anything; this trait is the
//! seam between the pure core and whichever provider supplies ticker
//! search, quotes, history, and fundamentals.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{BarSeries, Fundamental, Instrument, Interval, Quote, Symbol};

/// Boxed future alias used by the adapter contract.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    Internal,
}

/// Structured provider error carried into response envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for ticker search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub limit: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, limit: usize) -> Result<Self, SourceError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(SourceError::invalid_request(
                "search query must not be empty",
            ));
        }
        if limit == 0 {
            return Err(SourceError::invalid_request(
                "search limit must be greater than zero",
            ));
        }
        Ok(Self { query, limit })
    }
}

/// Request payload for quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub symbols: Vec<Symbol>,
}

impl QuoteRequest {
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, SourceError> {
        if symbols.is_empty() {
            return Err(SourceError::invalid_request(
                "quote request must include at least one symbol",
            ));
        }
        Ok(Self { symbols })
    }
}

/// Request payload for historical bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarsRequest {
    pub symbol: Symbol,
    pub interval: Interval,
    pub limit: usize,
}

impl BarsRequest {
    pub fn new(symbol: Symbol, interval: Interval, limit: usize) -> Result<Self, SourceError> {
        if limit == 0 {
            return Err(SourceError::invalid_request(
                "bars request limit must be greater than zero",
            ));
        }
        Ok(Self {
            symbol,
            interval,
            limit,
        })
    }
}

/// Request payload for fundamentals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundamentalsRequest {
    pub symbols: Vec<Symbol>,
}

impl FundamentalsRequest {
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, SourceError> {
        if symbols.is_empty() {
            return Err(SourceError::invalid_request(
                "fundamentals request must include at least one symbol",
            ));
        }
        Ok(Self { symbols })
    }
}

/// Normalized search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<Instrument>,
}

/// Normalized quote batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBatch {
    pub quotes: Vec<Quote>,
}

/// Normalized fundamentals batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsBatch {
    pub fundamentals: Vec<Fundamental>,
}

/// Provider adapter contract.
///
/// Implementations must be `Send + Sync`; callers may share one adapter
/// across tasks.
pub trait MarketData: Send + Sync {
    /// Short provider name recorded in envelope metadata.
    fn provider(&self) -> &'static str;

    /// Search instruments matching a free-text query.
    fn search<'a>(&'a self, req: SearchRequest) -> SourceFuture<'a, SearchResults>;

    /// Fetch the latest quotes for the requested symbols.
    fn quote<'a>(&'a self, req: QuoteRequest) -> SourceFuture<'a, QuoteBatch>;

    /// Fetch historical OHLCV bars.
    fn bars<'a>(&'a self, req: BarsRequest) -> SourceFuture<'a, BarSeries>;

    /// Fetch fundamentals snapshots.
    fn fundamentals<'a>(&'a self, req: FundamentalsRequest) -> SourceFuture<'a, FundamentalsBatch>;
}
