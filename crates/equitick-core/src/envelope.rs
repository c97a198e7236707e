use serde::{Deserialize, Serialize};

use crate::{SourceError, UtcDateTime, ValuationError};

/// Response envelope wrapping every machine-readable equitick output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self {
            meta,
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(meta: EnvelopeMeta, data: T, errors: Vec<EnvelopeError>) -> Self {
        Self { meta, data, errors }
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub generated_at: UtcDateTime,
    /// Which collaborator produced the payload ("yahoo", "local", ...).
    pub source: String,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(request_id: impl Into<String>, source: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            request_id: request_id.into(),
            generated_at: UtcDateTime::now(),
            source: source.into(),
            latency_ms,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// Machine-readable error entry with a stable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl EnvelopeError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            retryable: None,
        }
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }
}

impl From<&SourceError> for EnvelopeError {
    fn from(error: &SourceError) -> Self {
        Self::new(error.code(), error.message()).with_retryable(error.retryable())
    }
}

impl From<&ValuationError> for EnvelopeError {
    fn from(error: &ValuationError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_maps_to_coded_entry() {
        let source = SourceError::rate_limited("slow down");
        let entry = EnvelopeError::from(&source);

        assert_eq!(entry.code, "source.rate_limited");
        assert_eq!(entry.retryable, Some(true));
    }

    #[test]
    fn valuation_error_keeps_its_stable_code() {
        let failure = ValuationError::NegativeTerminalCashFlow {
            final_year_fcf: -12.0,
        };
        let entry = EnvelopeError::from(&failure);

        assert_eq!(entry.code, "valuation.negative_terminal_cash_flow");
        assert!(entry.message.contains("-12"));
    }

    #[test]
    fn empty_error_list_is_omitted_from_json() {
        let envelope = Envelope::success(EnvelopeMeta::new("req-12345678", "local", 3), 42u32);
        let rendered = serde_json::to_string(&envelope).expect("serializes");
        assert!(!rendered.contains("\"errors\""));
    }
}
