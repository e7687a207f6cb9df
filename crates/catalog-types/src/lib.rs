//! Catalog domain types for the product browsing service.
//!
//! This crate is pure data shared by every provider:
//!
//! - **Catalog**: products, categories and their write requests
//! - **Search**: filter criteria and the response envelopes
//! - **Price**: non-negative amounts exchanged as decimal text
//! - **Errors**: the one error type every operation rejects with
//!
//! # Example
//!
//! ```rust
//! use catalog_types::prelude::*;
//!
//! let filters = ProductFilters::new()
//!     .with_search("nike")
//!     .with_price_range(Some(Price::from_units(100_000)), None);
//! assert!(!filters.is_empty());
//! ```

pub mod error;
pub mod ids;
pub mod price;

pub mod catalog;
pub mod search;

pub use error::{CatalogError, CatalogResult};
pub use ids::*;
pub use price::{Price, PriceError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, CatalogResult};
    pub use crate::ids::*;
    pub use crate::price::Price;

    // Catalog
    pub use crate::catalog::{
        resolve_category, Category, CreateCategoryRequest, CreateProductRequest, Product,
        UpdateCategoryRequest, UpdateProductRequest,
    };

    // Search
    pub use crate::search::{ApiResponse, PaginatedResponse, ProductFilters};
}
