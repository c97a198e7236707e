//! # Equitick Store
//!
//! SQLite-backed persistence for named portfolios.
//!
//! The store owns an explicit connection pool with its lifecycle tied to the
//! [`PortfolioStore`] value — callers open it, pass it around, and drop it.
//! Weight validation is not this crate's job: callers persist only
//! already-validated [`equitick_core::PortfolioAllocation`] values.

mod error;
mod store;

pub use error::StoreError;
pub use store::{PortfolioRecord, PortfolioStore, StoreConfig};
