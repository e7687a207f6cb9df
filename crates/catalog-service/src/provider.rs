//! The provider contract shared by the simulated and remote catalogs.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use catalog_types::prelude::*;
use serde::{Deserialize, Serialize};

/// Which provider serves catalog calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// In-process simulated catalog.
    Mock,
    /// HTTP backend.
    Remote,
}

impl ProviderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Remote => "remote",
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Mock)
    }
}

impl fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" | "simulated" => Ok(Self::Mock),
            "remote" | "api" => Ok(Self::Remote),
            other => Err(CatalogError::Validation(format!(
                "unknown provider mode: {}",
                other
            ))),
        }
    }
}

/// Outcome of a connectivity probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReport {
    pub mode: ProviderMode,
    /// Backend base URL; absent for the simulated catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub reachable: bool,
    /// Round trip of the probe request in milliseconds.
    pub round_trip_ms: u64,
    /// Categories seen by the probe.
    pub categories: usize,
    /// Normalized failure message when unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A source of catalog data.
///
/// Every operation either yields its value or fails with a
/// [`CatalogError`] carrying one human-readable message.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Which mode this provider implements.
    fn mode(&self) -> ProviderMode;

    /// List products matching `filters`.
    async fn list_products(&self, filters: &ProductFilters)
        -> CatalogResult<PaginatedResponse<Product>>;

    /// Fetch one product.
    async fn get_product(&self, id: ProductId) -> CatalogResult<ApiResponse<Product>>;

    /// Create a product, resolving its category reference first.
    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> CatalogResult<ApiResponse<Product>>;

    /// Apply a partial update to a product.
    async fn update_product(
        &self,
        id: ProductId,
        request: &UpdateProductRequest,
    ) -> CatalogResult<ApiResponse<Product>>;

    /// Delete a product.
    async fn delete_product(&self, id: ProductId) -> CatalogResult<ApiResponse<()>>;

    /// List every category.
    async fn list_categories(&self) -> CatalogResult<ApiResponse<Vec<Category>>>;

    /// List products in one category; other filters still apply.
    async fn list_products_by_category(
        &self,
        category: CategoryId,
        filters: &ProductFilters,
    ) -> CatalogResult<PaginatedResponse<Product>>;

    /// Full-text product search.
    async fn search_products(
        &self,
        query: &str,
        filters: &ProductFilters,
    ) -> CatalogResult<PaginatedResponse<Product>>;

    async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> CatalogResult<ApiResponse<Category>>;

    async fn update_category(
        &self,
        id: CategoryId,
        request: &UpdateCategoryRequest,
    ) -> CatalogResult<ApiResponse<Category>>;

    async fn delete_category(&self, id: CategoryId) -> CatalogResult<ApiResponse<()>>;

    /// Probe the provider. Unreachable backends are reported, not raised.
    async fn test_connection(&self) -> ConnectionReport;
}
