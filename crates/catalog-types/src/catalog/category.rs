//! Category types for product organization.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::ids::CategoryId;

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name, unique within the set.
    pub name: String,
    /// Category description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    /// Create a category.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request to create a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateCategoryRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn validate(&self) -> CatalogResult<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "Category name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update of a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateCategoryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> CatalogResult<()> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(CatalogError::Validation(
                "Category name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve a category reference against a category list.
///
/// A reference is an exact category name or an identifier written as
/// decimal text. Name matches win over identifier matches, so a category
/// literally named "3" is found by name before id 3 is considered.
pub fn resolve_category(categories: &[Category], reference: &str) -> CatalogResult<CategoryId> {
    let reference = reference.trim();

    if let Some(category) = categories.iter().find(|c| c.name == reference) {
        return Ok(category.id);
    }

    if let Ok(id) = reference.parse::<CategoryId>() {
        if let Some(category) = categories.iter().find(|c| c.id == id) {
            return Ok(category.id);
        }
    }

    let available = categories
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Err(CatalogError::Validation(format!(
        "Category \"{}\" not found. Available categories are: {}",
        reference, available
    )))
}

/// Check whether `name` is already taken, ignoring case and `except`.
pub fn name_taken(categories: &[Category], name: &str, except: Option<CategoryId>) -> bool {
    let name = name.trim().to_lowercase();
    categories
        .iter()
        .filter(|c| Some(c.id) != except)
        .any(|c| c.name.to_lowercase() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category::new(CategoryId::new(1), "Electrónicos"),
            Category::new(CategoryId::new(2), "Ropa"),
            Category::new(CategoryId::new(7), "3"),
        ]
    }

    #[test]
    fn test_resolve_by_name() {
        let id = resolve_category(&categories(), "Electrónicos").unwrap();
        assert_eq!(id, CategoryId::new(1));
    }

    #[test]
    fn test_resolve_by_numeric_string() {
        let id = resolve_category(&categories(), "2").unwrap();
        assert_eq!(id, CategoryId::new(2));
    }

    #[test]
    fn test_name_wins_over_id() {
        let id = resolve_category(&categories(), "3").unwrap();
        assert_eq!(id, CategoryId::new(7));
    }

    #[test]
    fn test_unmatched_lists_available() {
        let err = resolve_category(&categories(), "Juguetes").unwrap_err();
        match err {
            CatalogError::Validation(msg) => {
                assert!(msg.contains("\"Juguetes\" not found"));
                assert!(msg.contains("Electrónicos, Ropa, 3"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_name_taken_ignores_case_and_self() {
        let cats = categories();
        assert!(name_taken(&cats, "ropa", None));
        assert!(!name_taken(&cats, "Ropa", Some(CategoryId::new(2))));
        assert!(!name_taken(&cats, "Libros", None));
    }
}
