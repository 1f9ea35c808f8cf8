//! Error types for catalog operations.

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error type for catalog operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Data validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<serde_path_to_error::Error<serde_json::Error>> for CatalogError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        CatalogError::Parse(format!("{} (at `{}`)", err.inner(), err.path()))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}
