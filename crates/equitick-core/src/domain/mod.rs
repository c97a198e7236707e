//! Canonical domain types shared across the workspace.

mod interval;
mod models;
mod symbol;
mod timestamp;

pub use interval::Interval;
pub use models::{
    validate_currency_code, AssetClass, Bar, BarSeries, Fundamental, Instrument, Quote,
};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
