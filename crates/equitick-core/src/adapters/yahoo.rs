//! Yahoo Finance adapter.
//!
//! Covers the four endpoints the valuation workflow needs: instrument
//! search (company name to ticker), quotes, historical bars, and the
//! fundamentals snapshot (free cash flow, shares outstanding, market cap,
//! current price).
//!
//! Yahoo's unofficial API wants a session cookie plus a "crumb" token on
//! every call; [`YahooSession`] caches the crumb with a TTL and refreshes
//! it once on 401/429. All upstream calls run behind a circuit breaker.
//!
//! The adapter also has a deterministic offline mode (seeded per-symbol
//! data, no network) used by tests and the CLI `--mock` flag.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::circuit_breaker::CircuitBreaker;
use crate::data_source::{
    BarsRequest, FundamentalsBatch, FundamentalsRequest, MarketData, QuoteBatch, QuoteRequest,
    SearchRequest, SearchResults, SourceError, SourceFuture,
};
use crate::http::{CannedHttpClient, HttpClient, HttpRequest, HttpResponse};
use crate::{
    AssetClass, Bar, BarSeries, Fundamental, Instrument, Interval, Quote, Symbol, UtcDateTime,
};

const CRUMB_ENDPOINTS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const SESSION_BOOTSTRAP_URL: &str = "https://fc.yahoo.com";
const REFERER: &str = "https://finance.yahoo.com/";

#[derive(Debug, Clone)]
struct CrumbCache {
    crumb: String,
    fetched_at: Instant,
}

/// Cookie/crumb session state for Yahoo's unofficial API.
///
/// The cookie itself lives in the transport's cookie jar; this type only
/// tracks the crumb token. `YAHOO_CRUMB` in the environment bypasses the
/// handshake entirely.
#[derive(Debug)]
pub struct YahooSession {
    cache: Mutex<Option<CrumbCache>>,
    ttl: Duration,
}

impl Default for YahooSession {
    fn default() -> Self {
        Self {
            cache: Mutex::new(None),
            ttl: Duration::from_secs(3600),
        }
    }
}

impl YahooSession {
    fn cached_crumb(&self) -> Option<String> {
        let cache = self.cache.lock().expect("crumb cache lock not poisoned");
        cache
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.crumb.clone())
    }

    fn store(&self, crumb: String) {
        let mut cache = self.cache.lock().expect("crumb cache lock not poisoned");
        *cache = Some(CrumbCache {
            crumb,
            fetched_at: Instant::now(),
        });
    }

    pub fn invalidate(&self) {
        let mut cache = self.cache.lock().expect("crumb cache lock not poisoned");
        *cache = None;
    }

    /// Current crumb token, refreshing the session if needed.
    pub async fn crumb(
        &self,
        http: &Arc<dyn HttpClient>,
        timeout_ms: u64,
    ) -> Result<String, SourceError> {
        if let Ok(crumb) = std::env::var("YAHOO_CRUMB") {
            if !crumb.trim().is_empty() {
                return Ok(crumb);
            }
        }

        if let Some(crumb) = self.cached_crumb() {
            return Ok(crumb);
        }

        // Visiting fc.yahoo.com seeds the session cookie in the jar.
        let bootstrap = HttpRequest::get(SESSION_BOOTSTRAP_URL)
            .with_header("referer", REFERER)
            .with_timeout_ms(timeout_ms);
        http.execute(bootstrap).await.map_err(|error| {
            SourceError::unavailable(format!("yahoo session bootstrap failed: {}", error.message()))
        })?;

        for endpoint in CRUMB_ENDPOINTS {
            let request = HttpRequest::get(endpoint)
                .with_header("referer", REFERER)
                .with_timeout_ms(timeout_ms);

            let Ok(response) = http.execute(request).await else {
                continue;
            };
            if !response.is_success() {
                continue;
            }

            let body = response.body.trim();
            if body.to_lowercase().contains("too many requests") {
                return Err(SourceError::rate_limited(
                    "yahoo rate limited while fetching crumb",
                ));
            }

            let looks_like_crumb = !body.is_empty()
                && body.len() < 100
                && !body.contains(' ')
                && !body.contains('<');
            if looks_like_crumb {
                self.store(body.to_owned());
                return Ok(body.to_owned());
            }
        }

        Err(SourceError::unavailable(
            "failed to obtain yahoo crumb from any endpoint",
        ))
    }
}

/// Yahoo Finance market data adapter.
pub struct YahooFinance {
    http: Arc<dyn HttpClient>,
    session: Arc<YahooSession>,
    breaker: Arc<CircuitBreaker>,
    timeout_ms: u64,
    offline: bool,
}

impl YahooFinance {
    /// Adapter issuing real API calls through the given transport.
    pub fn online(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            session: Arc::new(YahooSession::default()),
            breaker: Arc::new(CircuitBreaker::default()),
            timeout_ms: 10_000,
            offline: false,
        }
    }

    /// Deterministic adapter producing seeded per-symbol data, no network.
    pub fn offline() -> Self {
        Self {
            http: Arc::new(CannedHttpClient::new()),
            session: Arc::new(YahooSession::default()),
            breaker: Arc::new(CircuitBreaker::default()),
            timeout_ms: 10_000,
            offline: true,
        }
    }

    pub fn with_circuit_breaker(mut self, breaker: Arc<CircuitBreaker>) -> Self {
        self.breaker = breaker;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// GET `base_url` with the crumb appended, retrying once with a fresh
    /// session on 401/429.
    async fn authed_get(&self, base_url: &str) -> Result<String, SourceError> {
        if !self.breaker.allow_request() {
            return Err(SourceError::unavailable(
                "yahoo circuit breaker is open; skipping upstream call",
            ));
        }

        let crumb = self.session.crumb(&self.http, self.timeout_ms).await?;
        let response = self.execute_crumbed(base_url, &crumb).await?;

        if response.status == 401 || response.status == 429 {
            self.session.invalidate();
            let fresh_crumb = self.session.crumb(&self.http, self.timeout_ms).await?;
            let retry = self.execute_crumbed(base_url, &fresh_crumb).await?;

            if !retry.is_success() {
                self.breaker.record_failure();
                return if retry.status == 429 {
                    Err(SourceError::rate_limited(
                        "yahoo rate limited after session refresh",
                    ))
                } else {
                    Err(SourceError::unavailable(format!(
                        "yahoo returned status {} after session refresh",
                        retry.status
                    )))
                };
            }

            self.breaker.record_success();
            return Ok(retry.body);
        }

        if !response.is_success() {
            self.breaker.record_failure();
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        self.breaker.record_success();
        Ok(response.body)
    }

    async fn execute_crumbed(
        &self,
        base_url: &str,
        crumb: &str,
    ) -> Result<HttpResponse, SourceError> {
        let url = format!("{base_url}&crumb={}", urlencoding::encode(crumb));
        let request = HttpRequest::get(url)
            .with_header("referer", REFERER)
            .with_timeout_ms(self.timeout_ms);

        self.http.execute(request).await.map_err(|error| {
            self.breaker.record_failure();
            if error.is_retryable() {
                SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
            } else {
                SourceError::internal(format!("yahoo transport error: {}", error.message()))
            }
        })
    }

    async fn fetch_search(&self, req: &SearchRequest) -> Result<SearchResults, SourceError> {
        let base_url = format!(
            "https://query2.finance.yahoo.com/v1/finance/search?q={}&quotesCount={}",
            urlencoding::encode(&req.query),
            req.limit
        );
        let body = self.authed_get(&base_url).await?;
        parse_search_response(&body, &req.query, req.limit)
    }

    async fn fetch_quotes(&self, req: &QuoteRequest) -> Result<QuoteBatch, SourceError> {
        let symbols_param = req
            .symbols
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let base_url = format!(
            "https://query1.finance.yahoo.com/v7/finance/quote?symbols={}&fields=regularMarketPrice,currency",
            urlencoding::encode(&symbols_param)
        );
        let body = self.authed_get(&base_url).await?;
        parse_quote_response(&body)
    }

    async fn fetch_bars(&self, req: &BarsRequest) -> Result<BarSeries, SourceError> {
        let range = chart_range(req.interval, req.limit);
        let base_url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range={}&interval={}",
            urlencoding::encode(req.symbol.as_str()),
            range,
            req.interval.as_str()
        );
        let body = self.authed_get(&base_url).await?;
        parse_chart_response(&body, &req.symbol, req.interval, req.limit)
    }

    async fn fetch_fundamentals(
        &self,
        req: &FundamentalsRequest,
    ) -> Result<FundamentalsBatch, SourceError> {
        // quoteSummary serves one symbol per call.
        let mut fundamentals = Vec::with_capacity(req.symbols.len());
        for symbol in &req.symbols {
            let base_url = format!(
                "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=financialData,defaultKeyStatistics,price",
                urlencoding::encode(symbol.as_str())
            );
            let body = self.authed_get(&base_url).await?;
            if let Some(fundamental) = parse_quote_summary_response(&body, symbol)? {
                fundamentals.push(fundamental);
            }
        }
        Ok(FundamentalsBatch { fundamentals })
    }
}

impl MarketData for YahooFinance {
    fn provider(&self) -> &'static str {
        "yahoo"
    }

    fn search<'a>(&'a self, req: SearchRequest) -> SourceFuture<'a, SearchResults> {
        Box::pin(async move {
            if self.offline {
                offline_search(&req)
            } else {
                self.fetch_search(&req).await
            }
        })
    }

    fn quote<'a>(&'a self, req: QuoteRequest) -> SourceFuture<'a, QuoteBatch> {
        Box::pin(async move {
            if self.offline {
                offline_quotes(&req)
            } else {
                self.fetch_quotes(&req).await
            }
        })
    }

    fn bars<'a>(&'a self, req: BarsRequest) -> SourceFuture<'a, BarSeries> {
        Box::pin(async move {
            if self.offline {
                offline_bars(&req)
            } else {
                self.fetch_bars(&req).await
            }
        })
    }

    fn fundamentals<'a>(&'a self, req: FundamentalsRequest) -> SourceFuture<'a, FundamentalsBatch> {
        Box::pin(async move {
            if self.offline {
                offline_fundamentals(&req)
            } else {
                self.fetch_fundamentals(&req).await
            }
        })
    }
}

/// Pick the chart range wide enough to cover `limit` buckets.
fn chart_range(interval: Interval, limit: usize) -> &'static str {
    let days = interval.approximate_days() as usize * limit;
    match days {
        0..=28 => "1mo",
        29..=88 => "3mo",
        89..=178 => "6mo",
        179..=360 => "1y",
        361..=1800 => "5y",
        _ => "max",
    }
}

// ============================================================================
// Response parsing
// ============================================================================

fn parse_search_response(
    body: &str,
    query: &str,
    limit: usize,
) -> Result<SearchResults, SourceError> {
    let parsed: YahooSearchResponse = serde_json::from_str(body)
        .map_err(|error| SourceError::internal(format!("failed to parse yahoo search: {error}")))?;

    let results = parsed
        .quotes
        .into_iter()
        .filter_map(|quote| {
            let symbol = Symbol::parse(&quote.symbol).ok()?;
            let name = quote
                .short_name
                .or(quote.long_name)
                .unwrap_or_else(|| quote.symbol.clone());

            Instrument::new(
                symbol,
                name,
                quote.exchange,
                quote.currency.unwrap_or_else(|| String::from("USD")),
                asset_class_from_quote_type(quote.quote_type.as_deref().unwrap_or("")),
            )
            .ok()
        })
        .take(limit)
        .collect();

    Ok(SearchResults {
        query: query.to_owned(),
        results,
    })
}

fn parse_quote_response(body: &str) -> Result<QuoteBatch, SourceError> {
    let parsed: YahooQuoteResponse = serde_json::from_str(body)
        .map_err(|error| SourceError::internal(format!("failed to parse yahoo quote: {error}")))?;

    if let Some(error) = parsed.quote_response.error {
        if !error.is_null() {
            return Err(SourceError::unavailable(format!(
                "yahoo quote API error: {error}"
            )));
        }
    }

    let as_of = UtcDateTime::now();
    let quotes = parsed
        .quote_response
        .result
        .into_iter()
        .filter_map(|row| {
            let symbol = Symbol::parse(&row.symbol).ok()?;
            Quote::new(
                symbol,
                row.regular_market_price?,
                row.currency.unwrap_or_else(|| String::from("USD")),
                as_of,
            )
            .ok()
        })
        .collect();

    Ok(QuoteBatch { quotes })
}

fn parse_chart_response(
    body: &str,
    symbol: &Symbol,
    interval: Interval,
    limit: usize,
) -> Result<BarSeries, SourceError> {
    let parsed: YahooChartResponse = serde_json::from_str(body)
        .map_err(|error| SourceError::internal(format!("failed to parse yahoo chart: {error}")))?;

    if let Some(error) = parsed.chart.error {
        if !error.is_null() {
            return Err(SourceError::unavailable(format!(
                "yahoo chart API error: {error}"
            )));
        }
    }

    let result = parsed
        .chart
        .result
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::internal("no chart data in yahoo response"))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::internal("no OHLCV arrays in yahoo chart response"))?;

    let mut bars = Vec::new();
    for (index, &unix_ts) in timestamps.iter().enumerate() {
        if bars.len() == limit {
            break;
        }

        let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(index),
            quote.high.get(index),
            quote.low.get(index),
            quote.close.get(index),
        ) else {
            // Yahoo pads holidays with nulls; skip incomplete rows.
            continue;
        };

        let Ok(ts) = UtcDateTime::from_unix_timestamp(unix_ts) else {
            continue;
        };
        let volume = quote
            .volume
            .get(index)
            .copied()
            .flatten()
            .map(|value| value as u64);

        if let Ok(bar) = Bar::new(ts, *open, *high, *low, *close, volume) {
            bars.push(bar);
        }
    }

    Ok(BarSeries::new(symbol.clone(), interval, bars))
}

fn parse_quote_summary_response(
    body: &str,
    requested: &Symbol,
) -> Result<Option<Fundamental>, SourceError> {
    let parsed: YahooQuoteSummaryResponse = serde_json::from_str(body).map_err(|error| {
        SourceError::internal(format!("failed to parse yahoo fundamentals: {error}"))
    })?;

    if let Some(error) = parsed.quote_summary.error {
        if !error.is_null() {
            return Err(SourceError::unavailable(format!(
                "yahoo quoteSummary API error: {error}"
            )));
        }
    }

    let Some(result) = parsed.quote_summary.result.into_iter().next() else {
        return Ok(None);
    };

    let symbol = result
        .price
        .as_ref()
        .and_then(|price| price.symbol.as_deref())
        .and_then(|raw| Symbol::parse(raw).ok())
        .unwrap_or_else(|| requested.clone());

    let free_cash_flow = result
        .financial_data
        .as_ref()
        .and_then(|data| data.free_cash_flow.as_ref())
        .and_then(YahooRawNumber::value);
    let current_price = result
        .financial_data
        .as_ref()
        .and_then(|data| data.current_price.as_ref())
        .and_then(YahooRawNumber::value);
    let shares_outstanding = result
        .default_key_statistics
        .as_ref()
        .and_then(|stats| stats.shares_outstanding.as_ref())
        .and_then(YahooRawNumber::value);
    let market_cap = result
        .price
        .as_ref()
        .and_then(|price| price.market_cap.as_ref())
        .and_then(YahooRawNumber::value);

    let fundamental = Fundamental::new(
        symbol,
        UtcDateTime::now(),
        free_cash_flow,
        shares_outstanding,
        market_cap,
        current_price,
    )
    .map_err(|error| SourceError::internal(format!("yahoo fundamentals rejected: {error}")))?;

    Ok(Some(fundamental))
}

fn asset_class_from_quote_type(quote_type: &str) -> AssetClass {
    match quote_type {
        "EQUITY" => AssetClass::Equity,
        "ETF" => AssetClass::Etf,
        "MUTUALFUND" => AssetClass::Fund,
        "INDEX" => AssetClass::Index,
        "CRYPTOCURRENCY" => AssetClass::Crypto,
        "CURRENCY" => AssetClass::Forex,
        _ => AssetClass::Other,
    }
}

// ============================================================================
// Offline deterministic data
// ============================================================================

fn symbol_seed(symbol: &Symbol) -> u64 {
    let mut hasher = DefaultHasher::new();
    symbol.as_str().hash(&mut hasher);
    hasher.finish()
}

fn offline_price(seed: u64) -> f64 {
    95.0 + (seed % 4000) as f64 / 10.0
}

fn offline_catalog() -> Vec<Instrument> {
    let listings = [
        ("NFLX", "Netflix, Inc."),
        ("AMZN", "Amazon.com, Inc."),
        ("GOOG", "Alphabet Inc."),
        ("TSLA", "Tesla, Inc."),
        ("MSFT", "Microsoft Corporation"),
        ("META", "Meta Platforms, Inc."),
        ("AAPL", "Apple Inc."),
    ];

    listings
        .into_iter()
        .filter_map(|(ticker, name)| {
            let symbol = Symbol::parse(ticker).ok()?;
            Instrument::new(
                symbol,
                name,
                Some(String::from("NMS")),
                "USD",
                AssetClass::Equity,
            )
            .ok()
        })
        .collect()
}

fn offline_search(req: &SearchRequest) -> Result<SearchResults, SourceError> {
    let needle = req.query.to_ascii_lowercase();
    let results = offline_catalog()
        .into_iter()
        .filter(|instrument| {
            instrument
                .symbol
                .as_str()
                .to_ascii_lowercase()
                .contains(&needle)
                || instrument.name.to_ascii_lowercase().contains(&needle)
        })
        .take(req.limit)
        .collect();

    Ok(SearchResults {
        query: req.query.clone(),
        results,
    })
}

fn offline_quotes(req: &QuoteRequest) -> Result<QuoteBatch, SourceError> {
    let as_of = UtcDateTime::now();
    let quotes = req
        .symbols
        .iter()
        .map(|symbol| {
            let price = offline_price(symbol_seed(symbol));
            Quote::new(symbol.clone(), price, "USD", as_of)
                .map_err(|error| SourceError::internal(error.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuoteBatch { quotes })
}

fn offline_bars(req: &BarsRequest) -> Result<BarSeries, SourceError> {
    let seed = symbol_seed(&req.symbol);
    let base = 80.0 + (seed % 2000) as f64 / 100.0;
    let step_days = req.interval.approximate_days();
    let now = UtcDateTime::now();

    let mut bars = Vec::with_capacity(req.limit);
    for index in 0..req.limit {
        let age = (req.limit - 1 - index) as i64;
        let ts = now.plus_days(-age * step_days);

        // Gentle upward drift with a small deterministic wobble.
        let close = base + 0.05 * index as f64 + ((seed.wrapping_add(index as u64)) % 7) as f64 * 0.3;
        let open = close - 0.2;
        let high = close + 0.6;
        let low = close - 0.8;
        let volume = Some(25_000 + (index as u64) * 40);

        let bar = Bar::new(ts, open, high, low, close, volume)
            .map_err(|error| SourceError::internal(error.to_string()))?;
        bars.push(bar);
    }

    Ok(BarSeries::new(req.symbol.clone(), req.interval, bars))
}

fn offline_fundamentals(req: &FundamentalsRequest) -> Result<FundamentalsBatch, SourceError> {
    let as_of = UtcDateTime::now();
    let fundamentals = req
        .symbols
        .iter()
        .map(|symbol| {
            let seed = symbol_seed(symbol);
            let price = offline_price(seed);
            let shares = (6.0 + (seed % 38) as f64) * 1e8;
            let market_cap = price * shares;
            let free_cash_flow = market_cap * 0.045;

            Fundamental::new(
                symbol.clone(),
                as_of,
                Some(free_cash_flow),
                Some(shares),
                Some(market_cap),
                Some(price),
            )
            .map_err(|error| SourceError::internal(error.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FundamentalsBatch { fundamentals })
}

// ============================================================================
// Yahoo response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
struct YahooSearchResponse {
    #[serde(default)]
    quotes: Vec<YahooSearchQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooSearchQuote {
    symbol: String,
    #[serde(rename = "shortname", default)]
    short_name: Option<String>,
    #[serde(rename = "longname", default)]
    long_name: Option<String>,
    #[serde(default)]
    exchange: Option<String>,
    #[serde(rename = "quoteType", default)]
    quote_type: Option<String>,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResponseData,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResponseData {
    #[serde(default)]
    result: Vec<YahooQuoteRow>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteRow {
    symbol: String,
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Vec<YahooChartResult>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooChartIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: YahooQuoteSummaryData,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteSummaryData {
    #[serde(default)]
    result: Vec<YahooQuoteSummaryResult>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteSummaryResult {
    #[serde(rename = "financialData", default)]
    financial_data: Option<YahooFinancialData>,
    #[serde(rename = "defaultKeyStatistics", default)]
    default_key_statistics: Option<YahooKeyStatistics>,
    #[serde(default)]
    price: Option<YahooPriceModule>,
}

#[derive(Debug, Deserialize)]
struct YahooFinancialData {
    #[serde(rename = "freeCashflow", default)]
    free_cash_flow: Option<YahooRawNumber>,
    #[serde(rename = "currentPrice", default)]
    current_price: Option<YahooRawNumber>,
}

#[derive(Debug, Deserialize)]
struct YahooKeyStatistics {
    #[serde(rename = "sharesOutstanding", default)]
    shares_outstanding: Option<YahooRawNumber>,
}

#[derive(Debug, Deserialize)]
struct YahooPriceModule {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(rename = "marketCap", default)]
    market_cap: Option<YahooRawNumber>,
}

/// Yahoo wraps numbers as `{"raw": 123.4, "fmt": "123.40"}`.
#[derive(Debug, Deserialize)]
struct YahooRawNumber {
    #[serde(default)]
    raw: Option<f64>,
}

impl YahooRawNumber {
    fn value(&self) -> Option<f64> {
        self.raw.filter(|value| value.is_finite())
    }
}
