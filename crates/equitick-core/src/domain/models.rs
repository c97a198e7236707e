use serde::{Deserialize, Serialize};

use crate::{Interval, Symbol, UtcDateTime, ValidationError};

/// Canonical instrument class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Equity,
    Etf,
    Index,
    Crypto,
    Forex,
    Fund,
    Other,
}

/// Instrument metadata returned by ticker search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: Symbol,
    pub name: String,
    pub exchange: Option<String>,
    pub currency: String,
    pub asset_class: AssetClass,
}

impl Instrument {
    pub fn new(
        symbol: Symbol,
        name: impl Into<String>,
        exchange: Option<String>,
        currency: impl AsRef<str>,
        asset_class: AssetClass,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            symbol,
            name: name.into(),
            exchange,
            currency: validate_currency_code(currency.as_ref())?,
            asset_class,
        })
    }
}

/// Latest traded price for an instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
    pub currency: String,
    pub as_of: UtcDateTime,
}

impl Quote {
    pub fn new(
        symbol: Symbol,
        price: f64,
        currency: impl AsRef<str>,
        as_of: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;

        Ok(Self {
            symbol,
            price,
            currency: validate_currency_code(currency.as_ref())?,
            as_of,
        })
    }
}

/// OHLCV bar record for a given interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub ts: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl Bar {
    pub fn new(
        ts: UtcDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            ts,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Series wrapper used by the bars endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub symbol: Symbol,
    pub interval: Interval,
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: Symbol, interval: Interval, bars: Vec<Bar>) -> Self {
        Self {
            symbol,
            interval,
            bars,
        }
    }
}

/// Fundamentals snapshot feeding the valuation workflow.
///
/// Every metric is optional: providers routinely omit fields, and the
/// valuation engine never substitutes defaults — callers decide how to
/// handle gaps. `free_cash_flow` may be negative for distressed companies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fundamental {
    pub symbol: Symbol,
    pub as_of: UtcDateTime,
    pub free_cash_flow: Option<f64>,
    pub shares_outstanding: Option<f64>,
    pub market_cap: Option<f64>,
    pub current_price: Option<f64>,
}

impl Fundamental {
    pub fn new(
        symbol: Symbol,
        as_of: UtcDateTime,
        free_cash_flow: Option<f64>,
        shares_outstanding: Option<f64>,
        market_cap: Option<f64>,
        current_price: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_optional_finite("free_cash_flow", free_cash_flow)?;
        validate_optional_non_negative("shares_outstanding", shares_outstanding)?;
        validate_optional_non_negative("market_cap", market_cap)?;
        validate_optional_non_negative("current_price", current_price)?;

        Ok(Self {
            symbol,
            as_of,
            free_cash_flow,
            shares_outstanding,
            market_cap,
            current_price,
        })
    }
}

/// Validate and normalize currency to an uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        validate_non_negative(field, value)?;
    }
    Ok(())
}

fn validate_optional_finite(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue { field });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_currency() {
        assert_eq!(
            validate_currency_code("usd").expect("must normalize"),
            "USD"
        );
        assert!(matches!(
            validate_currency_code("DOLLARS"),
            Err(ValidationError::InvalidCurrency { .. })
        ));
    }

    #[test]
    fn rejects_bar_close_outside_range() {
        let ts = UtcDateTime::parse("2025-06-01T00:00:00Z").expect("timestamp");
        let symbol_err =
            Bar::new(ts, 10.0, 12.0, 9.0, 12.5, Some(100)).expect_err("close above high");
        assert!(matches!(symbol_err, ValidationError::InvalidBarBounds));
    }

    #[test]
    fn fundamental_allows_negative_free_cash_flow() {
        let symbol = Symbol::parse("NFLX").expect("symbol");
        let as_of = UtcDateTime::parse("2025-06-01T00:00:00Z").expect("timestamp");
        let fundamental =
            Fundamental::new(symbol, as_of, Some(-2.5e9), Some(4.4e8), None, Some(450.0))
                .expect("negative FCF is a valid observation");
        assert_eq!(fundamental.free_cash_flow, Some(-2.5e9));
    }

    #[test]
    fn fundamental_rejects_negative_share_count() {
        let symbol = Symbol::parse("NFLX").expect("symbol");
        let as_of = UtcDateTime::parse("2025-06-01T00:00:00Z").expect("timestamp");
        let err = Fundamental::new(symbol, as_of, None, Some(-1.0), None, None)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::NegativeValue { .. }));
    }
}
