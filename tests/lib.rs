// Shared re-exports for the behavior test suites.
pub use equitick_core::{
    compute_valuation, validate_weights, AllocationEntry, BarsRequest, CannedHttpClient,
    FundamentalsRequest, HttpResponse, Interval, MarketData, PortfolioAllocation, QuoteRequest,
    SearchRequest, Symbol, ValuationAssumptions, ValuationError, YahooFinance,
};
pub use std::sync::Arc;
