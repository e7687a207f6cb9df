//! Product types and write requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::ids::{CategoryId, ProductId};
use crate::price::Price;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier, assigned by the provider.
    pub id: ProductId,
    /// Product name (non-empty).
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Non-negative price.
    pub price: Price,
    /// Category this product belongs to.
    #[serde(alias = "category_id")]
    pub category: CategoryId,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Creation time, immutable.
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    /// Last modification time, never earlier than `created_at`.
    #[serde(alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from a validated create request.
    ///
    /// Both timestamps are stamped with `now`.
    pub fn from_request(
        id: ProductId,
        request: &CreateProductRequest,
        category: CategoryId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: request.name.trim().to_string(),
            description: request.description.clone(),
            price: request.price,
            category,
            image: request.image().map(str::to_string),
            stock: request.stock,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the fields present in `update` onto this product.
    ///
    /// `category` is the already-resolved identifier for the update's
    /// category reference, if it carried one. `updated_at` moves to
    /// `now`, or stays put if the clock went backwards.
    pub fn apply_update(
        &mut self,
        update: &UpdateProductRequest,
        category: Option<CategoryId>,
        now: DateTime<Utc>,
    ) {
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(image) = &update.image {
            self.image = if image.trim().is_empty() {
                None
            } else {
                Some(image.clone())
            };
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        self.updated_at = now.max(self.updated_at);
    }

    /// Case-insensitive substring match against name or description.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Request to create a product.
///
/// `category` is a category reference: an exact category name, or the
/// category identifier as decimal text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub stock: u32,
}

impl CreateProductRequest {
    /// Create a request with the required fields.
    pub fn new(name: impl Into<String>, price: Price, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            category: category.into(),
            image: None,
            stock: 0,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Image URL, with blank values treated as absent.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Check required fields before any provider work happens.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "Product name cannot be empty".to_string(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(CatalogError::Validation(
                "Product category is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update of a product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl UpdateProductRequest {
    /// Check if the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.image.is_none()
            && self.stock.is_none()
    }

    /// Reject present-but-blank required fields.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(CatalogError::Validation(
                "Product name cannot be empty".to_string(),
            ));
        }
        if self.category.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(CatalogError::Validation(
                "Product category cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
