use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use equitick_core::{AllocationEntry, PortfolioAllocation, Symbol, UtcDateTime};

use crate::error::StoreError;

/// Connection settings for the portfolio store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite URL, e.g. `sqlite://equitick.db` or `sqlite::memory:`.
    pub url: String,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 2,
        }
    }
}

/// A persisted portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRecord {
    pub id: String,
    pub name: String,
    pub allocation: PortfolioAllocation,
    pub created_at: UtcDateTime,
}

/// SQLite-backed portfolio persistence.
///
/// The pool is owned by this value — no ambient process-wide connection.
/// Symbol and weight lists are stored as JSON text columns, mirroring the
/// allocation's entry order.
pub struct PortfolioStore {
    pool: SqlitePool,
}

impl PortfolioStore {
    /// Connect and create the schema if it does not exist yet.
    pub async fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|error| StoreError::Connection(error.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|error| StoreError::Connection(error.to_string()))?;

        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    async fn initialize_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS portfolios (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                symbols TEXT NOT NULL,
                weights TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|error| StoreError::Query(error.to_string()))?;

        Ok(())
    }

    /// Persist a validated allocation under a unique name.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateName`] when the name is already taken — the
    /// caller-facing conflict signal for create flows.
    pub async fn save(
        &self,
        name: &str,
        allocation: &PortfolioAllocation,
    ) -> Result<PortfolioRecord, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidRecord(String::from(
                "portfolio name must not be empty",
            )));
        }

        let symbols: Vec<&str> = allocation
            .entries()
            .iter()
            .map(|entry| entry.symbol.as_str())
            .collect();
        let weights = allocation.weights();

        let symbols_json = serde_json::to_string(&symbols)
            .map_err(|error| StoreError::InvalidRecord(error.to_string()))?;
        let weights_json = serde_json::to_string(&weights)
            .map_err(|error| StoreError::InvalidRecord(error.to_string()))?;

        let record = PortfolioRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_owned(),
            allocation: allocation.clone(),
            created_at: UtcDateTime::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO portfolios (id, name, symbols, weights, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&symbols_json)
        .bind(&weights_json)
        .bind(record.created_at.format_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|error| match &error {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                StoreError::DuplicateName {
                    name: name.to_owned(),
                }
            }
            _ => StoreError::Query(error.to_string()),
        })?;

        Ok(record)
    }

    /// All stored portfolios, oldest first.
    pub async fn list(&self) -> Result<Vec<PortfolioRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, symbols, weights, created_at FROM portfolios ORDER BY created_at, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| StoreError::Query(error.to_string()))?;

        rows.into_iter().map(|row| hydrate_record(&row)).collect()
    }

    /// Delete a portfolio by id.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when no record matches the id.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let outcome = sqlx::query("DELETE FROM portfolios WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|error| StoreError::Query(error.to_string()))?;

        if outcome.rows_affected() == 0 {
            return Err(StoreError::NotFound { id: id.to_owned() });
        }

        Ok(())
    }
}

fn hydrate_record(row: &sqlx::sqlite::SqliteRow) -> Result<PortfolioRecord, StoreError> {
    let id: String = row
        .try_get("id")
        .map_err(|error| StoreError::Query(error.to_string()))?;
    let name: String = row
        .try_get("name")
        .map_err(|error| StoreError::Query(error.to_string()))?;
    let symbols_json: String = row
        .try_get("symbols")
        .map_err(|error| StoreError::Query(error.to_string()))?;
    let weights_json: String = row
        .try_get("weights")
        .map_err(|error| StoreError::Query(error.to_string()))?;
    let created_at_raw: String = row
        .try_get("created_at")
        .map_err(|error| StoreError::Query(error.to_string()))?;

    let symbols: Vec<String> = serde_json::from_str(&symbols_json)
        .map_err(|error| StoreError::InvalidRecord(error.to_string()))?;
    let weights: Vec<f64> = serde_json::from_str(&weights_json)
        .map_err(|error| StoreError::InvalidRecord(error.to_string()))?;

    if symbols.len() != weights.len() {
        return Err(StoreError::InvalidRecord(format!(
            "symbol/weight length mismatch for portfolio '{name}'"
        )));
    }

    let entries = symbols
        .into_iter()
        .zip(weights)
        .map(|(raw_symbol, weight_pct)| {
            let symbol = Symbol::parse(&raw_symbol)
                .map_err(|error| StoreError::InvalidRecord(error.to_string()))?;
            AllocationEntry::new(symbol, weight_pct)
                .map_err(|error| StoreError::InvalidRecord(error.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let allocation = PortfolioAllocation::new(entries)
        .map_err(|error| StoreError::InvalidRecord(error.to_string()))?;
    let created_at = UtcDateTime::parse(&created_at_raw)
        .map_err(|error| StoreError::InvalidRecord(error.to_string()))?;

    Ok(PortfolioRecord {
        id,
        name,
        allocation,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocation(pairs: &[(&str, f64)]) -> PortfolioAllocation {
        let entries = pairs
            .iter()
            .map(|(symbol, weight)| {
                AllocationEntry::new(Symbol::parse(symbol).expect("symbol"), *weight)
                    .expect("entry")
            })
            .collect();
        PortfolioAllocation::new(entries).expect("allocation should validate")
    }

    async fn open_temp_store(dir: &tempfile::TempDir) -> PortfolioStore {
        let url = format!("sqlite://{}", dir.path().join("portfolios.db").display());
        PortfolioStore::open(StoreConfig::new(url))
            .await
            .expect("store should open")
    }

    #[tokio::test]
    async fn saved_portfolio_round_trips_through_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_temp_store(&dir).await;

        let saved = store
            .save("growth", &allocation(&[("NFLX", 60.0), ("MSFT", 40.0)]))
            .await
            .expect("save should succeed");

        let records = store.list().await.expect("list should succeed");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, saved.id);
        assert_eq!(records[0].name, "growth");
        assert_eq!(records[0].allocation.entries().len(), 2);
        assert_eq!(records[0].allocation.entries()[0].symbol.as_str(), "NFLX");
    }

    #[tokio::test]
    async fn duplicate_name_is_a_distinct_conflict() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_temp_store(&dir).await;
        let balanced = allocation(&[("AMZN", 50.0), ("GOOG", 50.0)]);

        store
            .save("core", &balanced)
            .await
            .expect("first save should succeed");
        let err = store.save("core", &balanced).await.expect_err("must fail");

        assert!(matches!(err, StoreError::DuplicateName { name } if name == "core"));
    }

    #[tokio::test]
    async fn delete_removes_record_and_rejects_unknown_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_temp_store(&dir).await;

        let saved = store
            .save("tech", &allocation(&[("AAPL", 100.0)]))
            .await
            .expect("save should succeed");

        store.delete(&saved.id).await.expect("delete should succeed");
        assert!(store.list().await.expect("list").is_empty());

        let err = store.delete(&saved.id).await.expect_err("must fail");
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_touching_the_database() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_temp_store(&dir).await;

        let err = store
            .save("   ", &allocation(&[("AAPL", 100.0)]))
            .await
            .expect_err("must fail");
        assert!(matches!(err, StoreError::InvalidRecord(_)));
    }
}
