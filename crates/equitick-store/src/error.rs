use thiserror::Error;

/// Persistence-layer failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("portfolio name '{name}' already exists")]
    DuplicateName { name: String },

    #[error("portfolio '{id}' not found")]
    NotFound { id: String },

    #[error("stored portfolio record is invalid: {0}")]
    InvalidRecord(String),
}

impl StoreError {
    /// Stable machine-readable code for envelope errors.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "store.connection",
            Self::Query(_) => "store.query",
            Self::DuplicateName { .. } => "store.duplicate_name",
            Self::NotFound { .. } => "store.not_found",
            Self::InvalidRecord(_) => "store.invalid_record",
        }
    }
}
