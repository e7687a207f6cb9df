//! Catalog error types.

use thiserror::Error;

/// Errors surfaced by catalog providers.
///
/// Every failure rejects the operation in flight with a single message.
/// The selector passes these through unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Requested identifier is absent.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Input could not be accepted (unknown category, empty name, ...).
    #[error("{0}")]
    Validation(String),

    /// Failure injected by the simulated provider.
    #[error("{0}")]
    Simulated(String),

    /// Network or backend failure, already normalized to one message.
    #[error("{0}")]
    Transport(String),
}

impl CatalogError {
    /// Product lookup miss.
    pub fn product_not_found(id: impl Into<i64>) -> Self {
        CatalogError::NotFound {
            entity: "Product",
            id: id.into(),
        }
    }

    /// Category lookup miss.
    pub fn category_not_found(id: impl Into<i64>) -> Self {
        CatalogError::NotFound {
            entity: "Category",
            id: id.into(),
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    /// Stable kind name, used in logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::NotFound { .. } => "not_found",
            CatalogError::Validation(_) => "validation",
            CatalogError::Simulated(_) => "simulated",
            CatalogError::Transport(_) => "transport",
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Transport(format!("Failed to parse response: {}", e))
    }
}

/// Result alias used across the catalog crates.
pub type CatalogResult<T> = Result<T, CatalogError>;
