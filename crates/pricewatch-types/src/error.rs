use thiserror::Error;

/// Errors surfaced by product operations to both front ends.
///
/// Ownership failures are reported as `NotFound` so a caller cannot tell a
/// foreign product from a nonexistent one.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product not found")]
    NotFound,

    #[error("no price history recorded for this product")]
    NoPriceHistory,

    #[error("invalid product url: {0}")]
    InvalidUrl(String),

    #[error("invalid product snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ProductError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => ProductError::NotFound,
            other => ProductError::Storage(other.to_string()),
        }
    }
}

/// Errors from repository operations (used by trait definitions in pricewatch-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors raised while assembling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("missing required setting: {0}")]
    Missing(String),
}
