//! Product filter criteria.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::CategoryId;
use crate::price::Price;

/// Filter criteria for product listings.
///
/// Every field is optional; an absent field places no constraint.
/// Supplied criteria combine conjunctively.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilters {
    /// Case-insensitive substring over name and description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact category match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    /// Inclusive lower price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Price>,
    /// Inclusive upper price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Price>,
    /// Requested page (1-indexed), server-side pagination only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Requested page size, server-side pagination only.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "page_size")]
    pub page_size: Option<u32>,
}

impl ProductFilters {
    /// Create empty filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the price bounds.
    pub fn with_price_range(mut self, min: Option<Price>, max: Option<Price>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page.max(1));
        self.page_size = Some(page_size.max(1));
        self
    }

    /// Search text, with blank text treated as absent.
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Check if no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.search_text().is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.page.is_none()
            && self.page_size.is_none()
    }

    /// Check whether a product satisfies every supplied criterion.
    ///
    /// Pagination fields do not participate.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(text) = self.search_text() {
            if !product.matches_text(text) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }
        product.price.within(self.min_price, self.max_price)
    }
}
