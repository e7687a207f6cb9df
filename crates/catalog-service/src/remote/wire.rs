//! Backend wire shapes and their adaptation to the uniform envelopes.

use catalog_types::prelude::*;
use serde::{Deserialize, Serialize};

/// Page size assumed when the backend returns an empty page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// The backend's native paginated envelope.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BackendPage<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Translate a backend page into the uniform paginated envelope.
///
/// `page` comes from the `page` parameter of `next`, falling back to
/// `previous`, then to 1. `limit` is the number of results returned, or
/// [`DEFAULT_PAGE_SIZE`] for an empty page.
pub fn adapt_page<T>(page: BackendPage<T>) -> PaginatedResponse<T> {
    let current = page
        .next
        .as_deref()
        .and_then(page_from_url)
        .or_else(|| page.previous.as_deref().and_then(page_from_url))
        .unwrap_or(1);

    let limit = match page.results.len() {
        0 => DEFAULT_PAGE_SIZE,
        n => u32::try_from(n).unwrap_or(u32::MAX),
    };

    PaginatedResponse::new(page.results, page.count, current, limit)
}

/// Read the `page` query parameter out of a pagination link.
pub fn page_from_url(link: &str) -> Option<u32> {
    let url = url::Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// Category listings arrive either bare or wrapped in a page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CategoryListing {
    Bare(Vec<Category>),
    Paged { results: Vec<Category> },
    Other(serde_json::Value),
}

impl CategoryListing {
    pub(crate) fn into_categories(self) -> Vec<Category> {
        match self {
            Self::Bare(categories) | Self::Paged { results: categories } => categories,
            Self::Other(_) => Vec::new(),
        }
    }
}

/// Query pairs for a product listing, in wire order.
///
/// Absent and blank fields are left out; prices go out as decimal text.
pub fn filter_query(filters: &ProductFilters) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(category) = filters.category {
        query.push(("category", category.to_string()));
    }
    if let Some(min) = filters.min_price {
        query.push(("min_price", min.to_decimal_string()));
    }
    if let Some(max) = filters.max_price {
        query.push(("max_price", max.to_decimal_string()));
    }
    if let Some(search) = filters.search_text() {
        query.push(("search", search.trim().to_string()));
    }
    if let Some(page) = filters.page {
        query.push(("page", page.to_string()));
    }
    if let Some(page_size) = filters.page_size {
        query.push(("page_size", page_size.to_string()));
    }
    query
}

/// Body of `POST /products/`.
#[derive(Debug, Serialize)]
pub(crate) struct NewProduct<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: String,
    pub category: CategoryId,
    pub stock: u32,
    pub image: Option<&'a str>,
}

impl<'a> NewProduct<'a> {
    pub(crate) fn new(request: &'a CreateProductRequest, category: CategoryId) -> Self {
        Self {
            name: request.name.trim(),
            description: &request.description,
            price: request.price.to_decimal_string(),
            category,
            stock: request.stock,
            image: request.image(),
        }
    }
}

/// Body of `PUT /products/{id}/`. Only present fields are sent; a blank
/// image goes out as `null`.
#[derive(Debug, Serialize)]
pub(crate) struct ProductChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<&'a str>>,
}

impl<'a> ProductChanges<'a> {
    pub(crate) fn new(request: &'a UpdateProductRequest, category: Option<CategoryId>) -> Self {
        Self {
            name: request.name.as_deref().map(str::trim),
            description: request.description.as_deref(),
            price: request.price.map(|p| p.to_decimal_string()),
            category,
            stock: request.stock,
            image: request
                .image
                .as_deref()
                .map(|image| Some(image).filter(|s| !s.trim().is_empty())),
        }
    }
}
