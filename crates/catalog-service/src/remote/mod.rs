//! Catalog provider backed by the HTTP API.
//!
//! Holds no local copy: every read goes to the backend. Backend
//! envelopes are adapted here and transport failures surface as
//! [`CatalogError::Transport`] carrying the normalized message.

mod wire;

pub use wire::{adapt_page, filter_query, page_from_url, BackendPage, DEFAULT_PAGE_SIZE};

use std::time::Instant;

use async_trait::async_trait;
use catalog_fetch::{FetchClient, FetchError, Method, TimeoutConfig};
use catalog_types::prelude::*;
use tracing::{debug, error};

use crate::provider::{CatalogProvider, ConnectionReport, ProviderMode};
use wire::{CategoryListing, NewProduct, ProductChanges};

const PRODUCTS: &str = "/products/";
const SEARCH: &str = "/products/search/";
const CATEGORIES: &str = "/categories/";

/// Remote catalog provider.
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    client: FetchClient,
}

impl RemoteProvider {
    /// Wrap an existing transport client.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Build a transport client for `base_url` and wrap it.
    pub fn connect(base_url: impl Into<String>, timeout: TimeoutConfig) -> CatalogResult<Self> {
        let client = FetchClient::new(base_url, timeout)
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        Ok(Self::new(client))
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    async fn fetch_page(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> CatalogResult<PaginatedResponse<Product>> {
        let page: BackendPage<Product> = self
            .client
            .get(path)
            .query_pairs(query)
            .send()
            .await
            .and_then(|response| response.json())
            .map_err(|e| failed(Method::Get, path, e))?;

        debug!(path, count = page.count, returned = page.results.len(), "backend page received");
        Ok(adapt_page(page))
    }

    async fn fetch_categories(&self) -> CatalogResult<Vec<Category>> {
        let listing: CategoryListing = self
            .client
            .get_json(CATEGORIES)
            .await
            .map_err(|e| failed(Method::Get, CATEGORIES, e))?;
        Ok(listing.into_categories())
    }

    /// Resolve a category reference against the live category list.
    async fn resolve(&self, reference: &str) -> CatalogResult<CategoryId> {
        let categories = self.fetch_categories().await?;
        resolve_category(&categories, reference)
    }
}

fn product_path(id: ProductId) -> String {
    format!("{}{}/", PRODUCTS, id)
}

fn category_path(id: CategoryId) -> String {
    format!("{}{}/", CATEGORIES, id)
}

/// Log a failed backend call and convert it to a catalog error.
fn failed(method: Method, path: &str, err: FetchError) -> CatalogError {
    error!(
        %method,
        path,
        status = ?err.status(),
        error = %err,
        "backend request failed"
    );
    CatalogError::Transport(err.to_string())
}

#[async_trait]
impl CatalogProvider for RemoteProvider {
    fn mode(&self) -> ProviderMode {
        ProviderMode::Remote
    }

    async fn list_products(
        &self,
        filters: &ProductFilters,
    ) -> CatalogResult<PaginatedResponse<Product>> {
        self.fetch_page(PRODUCTS, filter_query(filters)).await
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<ApiResponse<Product>> {
        let path = product_path(id);
        let product: Product = self
            .client
            .get_json(&path)
            .await
            .map_err(|e| failed(Method::Get, &path, e))?;
        Ok(ApiResponse::ok(product, "Product retrieved successfully"))
    }

    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> CatalogResult<ApiResponse<Product>> {
        request.validate()?;
        let category = self.resolve(&request.category).await?;

        let product: Product = self
            .client
            .post_json(PRODUCTS, &NewProduct::new(request, category))
            .await
            .map_err(|e| failed(Method::Post, PRODUCTS, e))?;
        debug!(id = %product.id, %category, "product created");
        Ok(ApiResponse::ok(product, "Product created successfully"))
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: &UpdateProductRequest,
    ) -> CatalogResult<ApiResponse<Product>> {
        request.validate()?;
        let category = match request.category.as_deref() {
            Some(reference) => Some(self.resolve(reference).await?),
            None => None,
        };

        let path = product_path(id);
        let product: Product = self
            .client
            .put_json(&path, &ProductChanges::new(request, category))
            .await
            .map_err(|e| failed(Method::Put, &path, e))?;
        Ok(ApiResponse::ok(product, "Product updated successfully"))
    }

    async fn delete_product(&self, id: ProductId) -> CatalogResult<ApiResponse<()>> {
        let path = product_path(id);
        self.client
            .delete_path(&path)
            .await
            .map_err(|e| failed(Method::Delete, &path, e))?;
        Ok(ApiResponse::ok((), "Product deleted successfully"))
    }

    async fn list_categories(&self) -> CatalogResult<ApiResponse<Vec<Category>>> {
        let categories = self.fetch_categories().await?;
        Ok(ApiResponse::ok(categories, "Categories retrieved successfully"))
    }

    async fn list_products_by_category(
        &self,
        category: CategoryId,
        filters: &ProductFilters,
    ) -> CatalogResult<PaginatedResponse<Product>> {
        let filters = filters.clone().with_category(category);
        self.fetch_page(PRODUCTS, filter_query(&filters)).await
    }

    async fn search_products(
        &self,
        query: &str,
        filters: &ProductFilters,
    ) -> CatalogResult<PaginatedResponse<Product>> {
        let mut pairs = vec![("q", query.trim().to_string())];
        pairs.extend(
            filter_query(filters)
                .into_iter()
                .filter(|(key, _)| *key != "search"),
        );
        self.fetch_page(SEARCH, pairs).await
    }

    async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> CatalogResult<ApiResponse<Category>> {
        request.validate()?;
        let category: Category = self
            .client
            .post_json(CATEGORIES, request)
            .await
            .map_err(|e| failed(Method::Post, CATEGORIES, e))?;
        Ok(ApiResponse::ok(category, "Category created successfully"))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        request: &UpdateCategoryRequest,
    ) -> CatalogResult<ApiResponse<Category>> {
        request.validate()?;
        let path = category_path(id);
        let category: Category = self
            .client
            .put_json(&path, request)
            .await
            .map_err(|e| failed(Method::Put, &path, e))?;
        Ok(ApiResponse::ok(category, "Category updated successfully"))
    }

    async fn delete_category(&self, id: CategoryId) -> CatalogResult<ApiResponse<()>> {
        let path = category_path(id);
        self.client
            .delete_path(&path)
            .await
            .map_err(|e| failed(Method::Delete, &path, e))?;
        Ok(ApiResponse::ok((), "Category deleted successfully"))
    }

    async fn test_connection(&self) -> ConnectionReport {
        let started = Instant::now();
        let outcome = self.client.get_json::<CategoryListing>(CATEGORIES).await;
        let round_trip_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let mut report = ConnectionReport {
            mode: ProviderMode::Remote,
            base_url: Some(self.base_url().to_string()),
            reachable: false,
            round_trip_ms,
            categories: 0,
            error: None,
        };
        match outcome {
            Ok(listing) => {
                report.reachable = true;
                report.categories = listing.into_categories().len();
            }
            Err(e) => {
                debug!(error = %e, "connection probe failed");
                report.error = Some(e.to_string());
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    fn provider(server: &MockServer) -> RemoteProvider {
        RemoteProvider::connect(server.url("/api"), TimeoutConfig::from_secs(5)).unwrap()
    }

    fn product_json(id: i64, category: i64) -> Value {
        json!({
            "id": id,
            "name": format!("Producto {}", id),
            "description": "",
            "price": "85000.00",
            "category": category,
            "image": null,
            "stock": 3,
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-01-15T10:30:00Z"
        })
    }

    fn categories_json() -> Value {
        json!([
            {"id": 1, "name": "Electrónicos"},
            {"id": 2, "name": "Ropa", "description": "Vestimenta y accesorios"}
        ])
    }

    #[tokio::test]
    async fn list_adapts_backend_page() {
        let server = MockServer::start_async().await;
        let results: Vec<Value> = (1..=20).map(|id| product_json(id, 1)).collect();
        server.mock(|when, then| {
            when.method(GET).path("/api/products/").query_param("page", "2");
            then.status(200).json_body(json!({
                "count": 45,
                "next": "http://backend/api/products/?page=3",
                "previous": "http://backend/api/products/?page=1",
                "results": results
            }));
        });

        let page = provider(&server)
            .list_products(&ProductFilters::new().with_pagination(2, 20))
            .await
            .unwrap();
        assert_eq!(page.total, 45);
        assert_eq!(page.page, 3);
        assert_eq!(page.limit, 20);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data[0].price, Price::from_units(85_000));
    }

    #[tokio::test]
    async fn list_without_links_defaults_to_first_page() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/products/");
            then.status(200).json_body(json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [product_json(1, 1), product_json(2, 2)]
            }));
        });

        let page = provider(&server).list_products(&ProductFilters::new()).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn list_sends_filters_as_query() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/products/")
                .query_param("category", "2")
                .query_param("min_price", "100.00")
                .query_param("search", "nike");
            then.status(200)
                .json_body(json!({"count": 0, "next": null, "previous": null, "results": []}));
        });

        let filters = ProductFilters::new()
            .with_search("nike")
            .with_category(CategoryId::new(2))
            .with_price_range(Some(Price::from_units(100)), None);
        let page = provider(&server).list_products(&filters).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.limit, DEFAULT_PAGE_SIZE);
        mock.assert();
    }

    #[tokio::test]
    async fn get_wraps_record() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/products/7/");
            then.status(200).json_body(product_json(7, 1));
        });

        let response = provider(&server).get_product(ProductId::new(7)).await.unwrap();
        assert_eq!(response.success, Some(true));
        assert_eq!(response.data.id, ProductId::new(7));
    }

    #[tokio::test]
    async fn oversized_price_is_a_parse_error() {
        let server = MockServer::start_async().await;
        let mut record = product_json(8, 1);
        record["price"] = json!(200000000000000000u64);
        server.mock(|when, then| {
            when.method(GET).path("/api/products/8/");
            then.status(200).json_body(record);
        });

        let err = provider(&server).get_product(ProductId::new(8)).await.unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert!(err.to_string().starts_with("Failed to parse response:"));
    }

    #[tokio::test]
    async fn errors_surface_normalized_message() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/products/99/");
            then.status(404).json_body(json!({"detail": "Not found."}));
        });
        server.mock(|when, then| {
            when.method(DELETE).path("/api/products/1/");
            then.status(500).json_body(json!({}));
        });

        let provider = provider(&server);
        let missing = provider.get_product(ProductId::new(99)).await.unwrap_err();
        assert_eq!(missing, CatalogError::Transport("Not found.".to_string()));

        let broken = provider.delete_product(ProductId::new(1)).await.unwrap_err();
        assert_eq!(broken.to_string(), "HTTP error! status: 500");
    }

    #[tokio::test]
    async fn create_submits_resolved_category_id() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/categories/");
            then.status(200).json_body(categories_json());
        });
        let post = server.mock(|when, then| {
            when.method(POST).path("/api/products/").json_body(json!({
                "name": "iPhone 15 Pro",
                "description": "",
                "price": "4500000.00",
                "category": 1,
                "stock": 15,
                "image": null
            }));
            then.status(201).json_body(product_json(11, 1));
        });

        let request = CreateProductRequest::new("iPhone 15 Pro", Price::from_units(4_500_000), "Electrónicos")
            .with_stock(15);
        let created = provider(&server).create_product(&request).await.unwrap();
        assert_eq!(created.data.id, ProductId::new(11));
        post.assert();
    }

    #[tokio::test]
    async fn create_with_unknown_category_never_posts() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/categories/");
            then.status(200).json_body(json!({"count": 2, "results": categories_json()}));
        });
        let post = server.mock(|when, then| {
            when.method(POST).path("/api/products/");
            then.status(201).json_body(product_json(11, 1));
        });

        let request = CreateProductRequest::new("Dron", Price::from_units(900_000), "Juguetes");
        let err = provider(&server).create_product(&request).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Category \"Juguetes\" not found. Available categories are: Electrónicos, Ropa"
        );
        post.assert_hits(0);
    }

    #[tokio::test]
    async fn update_sends_only_present_fields() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/categories/");
            then.status(200).json_body(categories_json());
        });
        let put = server.mock(|when, then| {
            when.method(PUT)
                .path("/api/products/4/")
                .json_body(json!({"category": 2, "stock": 0}));
            then.status(200).json_body(product_json(4, 2));
        });

        let update = UpdateProductRequest {
            category: Some("2".to_string()),
            stock: Some(0),
            ..Default::default()
        };
        let updated = provider(&server)
            .update_product(ProductId::new(4), &update)
            .await
            .unwrap();
        assert_eq!(updated.data.category, CategoryId::new(2));
        put.assert();
    }

    #[tokio::test]
    async fn categories_accept_both_shapes() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/categories/");
            then.status(200).json_body(json!({"results": categories_json()}));
        });

        let categories = provider(&server).list_categories().await.unwrap();
        assert_eq!(categories.data.len(), 2);
        assert_eq!(
            categories.data[1].description.as_deref(),
            Some("Vestimenta y accesorios")
        );
    }

    #[tokio::test]
    async fn unexpected_category_shape_is_empty() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/categories/");
            then.status(200).json_body(json!({"categories": "none"}));
        });

        let categories = provider(&server).list_categories().await.unwrap();
        assert!(categories.data.is_empty());
    }

    #[tokio::test]
    async fn search_uses_search_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/products/search/")
                .query_param("q", "nike")
                .query_param("page_size", "5");
            then.status(200).json_body(json!({
                "count": 1,
                "next": null,
                "previous": null,
                "results": [product_json(8, 2)]
            }));
        });

        let filters = ProductFilters::new().with_pagination(1, 5);
        let page = provider(&server).search_products("nike", &filters).await.unwrap();
        assert_eq!(page.len(), 1);
        mock.assert();
    }

    #[tokio::test]
    async fn by_category_filters_product_listing() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/products/")
                .query_param("category", "5");
            then.status(200).json_body(json!({
                "count": 1,
                "next": null,
                "previous": null,
                "results": [product_json(6, 5)]
            }));
        });

        let page = provider(&server)
            .list_products_by_category(CategoryId::new(5), &ProductFilters::new())
            .await
            .unwrap();
        assert_eq!(page.data[0].category, CategoryId::new(5));
        mock.assert();
    }

    #[tokio::test]
    async fn category_writes_hit_category_endpoints() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/api/categories/")
                .json_body(json!({"name": "Juguetes"}));
            then.status(201).json_body(json!({"id": 6, "name": "Juguetes"}));
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/api/categories/6/");
            then.status(204);
        });

        let provider = provider(&server);
        let created = provider
            .create_category(&CreateCategoryRequest::new("Juguetes"))
            .await
            .unwrap();
        assert_eq!(created.data.id, CategoryId::new(6));
        provider.delete_category(CategoryId::new(6)).await.unwrap();

        create.assert();
        delete.assert();
    }

    #[tokio::test]
    async fn connection_probe_reports_reachability() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/categories/");
            then.status(200).json_body(categories_json());
        });

        let report = provider(&server).test_connection().await;
        assert!(report.reachable);
        assert_eq!(report.categories, 2);
        assert_eq!(report.mode, ProviderMode::Remote);

        let down = RemoteProvider::connect("http://127.0.0.1:9/api", TimeoutConfig::from_secs(2))
            .unwrap()
            .test_connection()
            .await;
        assert!(!down.reachable);
        assert_eq!(down.error.as_deref(), Some("HTTP error! status: unknown"));
    }
}
