//! Behavior-driven tests for portfolio weight validation and persistence.

use equitick_core::{validate_weights, AllocationEntry, PortfolioAllocation, Symbol, ValidationError};
use equitick_store::{PortfolioStore, StoreConfig, StoreError};
use tempfile::tempdir;

fn allocation(pairs: &[(&str, f64)]) -> PortfolioAllocation {
    let entries = pairs
        .iter()
        .map(|(symbol, weight)| {
            AllocationEntry::new(Symbol::parse(symbol).expect("symbol"), *weight)
                .expect("entry should validate")
        })
        .collect();
    PortfolioAllocation::new(entries).expect("allocation should validate")
}

async fn open_store(dir: &tempfile::TempDir) -> PortfolioStore {
    let url = format!("sqlite://{}", dir.path().join("portfolios.db").display());
    PortfolioStore::open(StoreConfig::new(url))
        .await
        .expect("store should open")
}

// =============================================================================
// Weight validation
// =============================================================================

#[test]
fn when_weights_sum_to_100_within_tolerance_validation_passes() {
    assert!(validate_weights(&[33.33, 33.33, 33.34]));
    assert!(validate_weights(&[25.0, 25.0, 25.0, 25.0]));
    assert!(validate_weights(&[100.0]));
}

#[test]
fn when_weights_fall_short_validation_fails() {
    assert!(!validate_weights(&[50.0, 40.0]));
    assert!(!validate_weights(&[50.0, 50.5]));
}

#[test]
fn when_allocation_is_empty_validation_fails() {
    // An empty allocation sums to 0, not 100.
    assert!(!validate_weights(&[]));
}

#[test]
fn when_user_duplicates_an_asset_the_allocation_is_rejected() {
    let entries = vec![
        AllocationEntry::new(Symbol::parse("NFLX").expect("symbol"), 50.0).expect("entry"),
        AllocationEntry::new(Symbol::parse("NFLX").expect("symbol"), 50.0).expect("entry"),
    ];

    let err = PortfolioAllocation::new(entries).expect_err("must fail");
    assert!(matches!(
        err,
        ValidationError::DuplicateAllocationSymbol { .. }
    ));
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn when_user_saves_a_portfolio_it_shows_up_in_the_listing() {
    // Given: A fresh store
    let dir = tempdir().expect("tempdir");
    let store = open_store(&dir).await;

    // When: User saves a balanced portfolio
    let saved = store
        .save(
            "tech growth",
            &allocation(&[("NFLX", 40.0), ("AMZN", 35.0), ("GOOG", 25.0)]),
        )
        .await
        .expect("save should succeed");

    // Then: Listing returns the record with its entries intact, in order
    let records = store.list().await.expect("list should succeed");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, saved.id);
    assert_eq!(records[0].name, "tech growth");

    let symbols: Vec<&str> = records[0]
        .allocation
        .entries()
        .iter()
        .map(|entry| entry.symbol.as_str())
        .collect();
    assert_eq!(symbols, vec!["NFLX", "AMZN", "GOOG"]);
    assert!(validate_weights(&records[0].allocation.weights()));
}

#[tokio::test]
async fn when_user_reuses_a_portfolio_name_they_get_a_conflict() {
    let dir = tempdir().expect("tempdir");
    let store = open_store(&dir).await;
    let balanced = allocation(&[("MSFT", 50.0), ("META", 50.0)]);

    store
        .save("core", &balanced)
        .await
        .expect("first save should succeed");

    let err = store.save("core", &balanced).await.expect_err("must fail");
    assert!(matches!(&err, StoreError::DuplicateName { name } if name.as_str() == "core"));
    assert_eq!(err.code(), "store.duplicate_name");

    // The conflict must not have created a second record.
    assert_eq!(store.list().await.expect("list").len(), 1);
}

#[tokio::test]
async fn when_user_deletes_a_portfolio_it_is_gone() {
    let dir = tempdir().expect("tempdir");
    let store = open_store(&dir).await;

    let keep = store
        .save("keep", &allocation(&[("AAPL", 100.0)]))
        .await
        .expect("save should succeed");
    let drop = store
        .save("drop", &allocation(&[("TSLA", 100.0)]))
        .await
        .expect("save should succeed");

    store.delete(&drop.id).await.expect("delete should succeed");

    let records = store.list().await.expect("list should succeed");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, keep.id);
}

#[tokio::test]
async fn when_user_deletes_an_unknown_id_they_get_not_found() {
    let dir = tempdir().expect("tempdir");
    let store = open_store(&dir).await;

    let err = store
        .delete("00000000-0000-0000-0000-000000000000")
        .await
        .expect_err("must fail");
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert_eq!(err.code(), "store.not_found");
}

#[tokio::test]
async fn when_the_store_reopens_saved_portfolios_survive() {
    let dir = tempdir().expect("tempdir");

    {
        let store = open_store(&dir).await;
        store
            .save("durable", &allocation(&[("NFLX", 100.0)]))
            .await
            .expect("save should succeed");
    }

    let reopened = open_store(&dir).await;
    let records = reopened.list().await.expect("list should succeed");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "durable");
}
