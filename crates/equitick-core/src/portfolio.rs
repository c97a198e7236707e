//! Portfolio allocation value object and weight validation.

use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

/// Absolute tolerance for the 100% weight-sum check.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// True iff the weights sum to 100% within [`WEIGHT_SUM_TOLERANCE`].
///
/// A pure predicate: no side effects, no errors. An empty slice sums to 0
/// and therefore fails, as does any non-finite weight (NaN poisons the sum).
/// Callers decide how to react — typically by refusing to persist the
/// allocation.
pub fn validate_weights(weights: &[f64]) -> bool {
    let sum: f64 = weights.iter().sum();
    (sum - 100.0).abs() < WEIGHT_SUM_TOLERANCE
}

/// One (asset, weight) pair of an allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub symbol: Symbol,
    pub weight_pct: f64,
}

impl AllocationEntry {
    pub fn new(symbol: Symbol, weight_pct: f64) -> Result<Self, ValidationError> {
        if !weight_pct.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "weight_pct",
            });
        }
        if weight_pct < 0.0 {
            return Err(ValidationError::NegativeValue {
                field: "weight_pct",
            });
        }

        Ok(Self { symbol, weight_pct })
    }
}

/// Ordered, validated set of portfolio weights.
///
/// Construction enforces everything the persistence layer relies on: at
/// least one entry, no duplicate symbols, finite non-negative weights, and
/// a weight sum of 100% within tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AllocationEntry>", into = "Vec<AllocationEntry>")]
pub struct PortfolioAllocation {
    entries: Vec<AllocationEntry>,
}

impl PortfolioAllocation {
    pub fn new(entries: Vec<AllocationEntry>) -> Result<Self, ValidationError> {
        if entries.is_empty() {
            return Err(ValidationError::EmptyAllocation);
        }

        for (index, entry) in entries.iter().enumerate() {
            let duplicate = entries[..index]
                .iter()
                .any(|earlier| earlier.symbol == entry.symbol);
            if duplicate {
                return Err(ValidationError::DuplicateAllocationSymbol {
                    symbol: entry.symbol.as_str().to_owned(),
                });
            }
        }

        let weights: Vec<f64> = entries.iter().map(|entry| entry.weight_pct).collect();
        if !validate_weights(&weights) {
            return Err(ValidationError::UnbalancedAllocation {
                sum: weights.iter().sum(),
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter().map(|entry| &entry.symbol)
    }

    pub fn weights(&self) -> Vec<f64> {
        self.entries.iter().map(|entry| entry.weight_pct).collect()
    }
}

impl TryFrom<Vec<AllocationEntry>> for PortfolioAllocation {
    type Error = ValidationError;

    fn try_from(entries: Vec<AllocationEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<PortfolioAllocation> for Vec<AllocationEntry> {
    fn from(value: PortfolioAllocation) -> Self {
        value.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(symbol: &str, weight_pct: f64) -> AllocationEntry {
        AllocationEntry::new(Symbol::parse(symbol).expect("symbol"), weight_pct)
            .expect("entry should validate")
    }

    #[test]
    fn accepts_weights_within_tolerance() {
        assert!(validate_weights(&[33.33, 33.33, 33.34]));
        assert!(validate_weights(&[100.0]));
    }

    #[test]
    fn rejects_underweight_allocation() {
        assert!(!validate_weights(&[50.0, 40.0]));
    }

    #[test]
    fn rejects_empty_weight_list() {
        // Empty sums to 0, not 100.
        assert!(!validate_weights(&[]));
    }

    #[test]
    fn rejects_nan_weight() {
        assert!(!validate_weights(&[50.0, f64::NAN, 50.0]));
    }

    #[test]
    fn builds_balanced_allocation() {
        let allocation = PortfolioAllocation::new(vec![
            entry("NFLX", 40.0),
            entry("MSFT", 35.0),
            entry("AMZN", 25.0),
        ])
        .expect("allocation should validate");

        assert_eq!(allocation.entries().len(), 3);
        assert!(validate_weights(&allocation.weights()));
    }

    #[test]
    fn rejects_duplicate_symbols() {
        let err = PortfolioAllocation::new(vec![entry("NFLX", 50.0), entry("NFLX", 50.0)])
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::DuplicateAllocationSymbol { symbol } if symbol == "NFLX"
        ));
    }

    #[test]
    fn rejects_unbalanced_sum() {
        let err = PortfolioAllocation::new(vec![entry("NFLX", 50.0), entry("MSFT", 40.0)])
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::UnbalancedAllocation { sum } if (sum - 90.0).abs() < 1e-9
        ));
    }

    #[test]
    fn rejects_empty_entry_list() {
        let err = PortfolioAllocation::new(Vec::new()).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyAllocation));
    }
}
