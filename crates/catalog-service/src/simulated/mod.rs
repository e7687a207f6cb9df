//! In-process catalog that stands in for the backend.
//!
//! Every operation first waits out its configured delay, then rolls its
//! failure probability, and only then touches the store. Store access is
//! synchronous and never held across an await, so overlapping writes to
//! the same record resolve last-write-wins.

mod profile;
mod seed;

pub use profile::{Operation, OperationProfile, SimulationProfile};
pub use seed::SeedData;

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use catalog_types::catalog::name_taken;
use catalog_types::prelude::*;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

use crate::provider::{CatalogProvider, ConnectionReport, ProviderMode};

type SharedRng = Box<dyn RngCore + Send>;

/// Simulated catalog provider.
pub struct SimulatedProvider {
    seed: SeedData,
    profile: SimulationProfile,
    store: Mutex<Store>,
    rng: Mutex<SharedRng>,
}

impl SimulatedProvider {
    /// Create a provider over `seed` with an entropy-seeded random source.
    pub fn new(seed: SeedData, profile: SimulationProfile) -> Self {
        Self {
            store: Mutex::new(Store::from_seed(&seed)),
            seed,
            profile,
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
        }
    }

    /// The demo catalog with the built-in latency and failure rates.
    pub fn demo() -> Self {
        Self::new(SeedData::demo(), SimulationProfile::realistic())
    }

    /// Replace the random source used for failure injection.
    pub fn with_rng<R>(mut self, rng: R) -> Self
    where
        R: RngCore + Send + 'static,
    {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    /// Use a deterministic random source.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_profile(mut self, profile: SimulationProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn profile(&self) -> &SimulationProfile {
        &self.profile
    }

    /// Restore products, categories and identifier counters to the seed.
    pub fn reset(&self) {
        *self.store() = Store::from_seed(&self.seed);
        debug!(
            products = self.seed.products.len(),
            categories = self.seed.categories.len(),
            "simulated catalog reset"
        );
    }

    /// Snapshot of every stored product, unfiltered.
    pub fn all_products(&self) -> Vec<Product> {
        self.store().products.clone()
    }

    /// Snapshot of every stored category.
    pub fn all_categories(&self) -> Vec<Category> {
        self.store().categories.clone()
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn roll_failure(&self, rate: f64) -> bool {
        if rate <= 0.0 {
            return false;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen::<f64>() < rate
    }

    /// Wait out the operation's latency, then maybe fail it.
    async fn simulate(&self, op: Operation) -> CatalogResult<()> {
        let settings = self.profile.for_operation(op);
        if !settings.delay.is_zero() {
            tokio::time::sleep(settings.delay).await;
        }
        if self.roll_failure(settings.failure_rate) {
            debug!(
                operation = op.as_str(),
                rate = settings.failure_rate,
                "injecting simulated failure"
            );
            return Err(CatalogError::Simulated(op.failure_message().to_string()));
        }
        Ok(())
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::demo()
    }
}

#[async_trait]
impl CatalogProvider for SimulatedProvider {
    fn mode(&self) -> ProviderMode {
        ProviderMode::Mock
    }

    async fn list_products(
        &self,
        filters: &ProductFilters,
    ) -> CatalogResult<PaginatedResponse<Product>> {
        self.simulate(Operation::ListProducts).await?;
        let products = self.store().matching(filters);
        Ok(PaginatedResponse::single_page(products))
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<ApiResponse<Product>> {
        self.simulate(Operation::GetProduct).await?;
        let product = self.store().product(id)?;
        Ok(ApiResponse::ok(product, "Product retrieved successfully"))
    }

    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> CatalogResult<ApiResponse<Product>> {
        request.validate()?;
        self.simulate(Operation::CreateProduct).await?;
        let product = self.store().insert_product(request, Utc::now())?;
        debug!(id = %product.id, category = %product.category, "simulated product created");
        Ok(ApiResponse::ok(product, "Product created successfully"))
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: &UpdateProductRequest,
    ) -> CatalogResult<ApiResponse<Product>> {
        request.validate()?;
        self.simulate(Operation::UpdateProduct).await?;
        let product = self.store().update_product(id, request, Utc::now())?;
        Ok(ApiResponse::ok(product, "Product updated successfully"))
    }

    async fn delete_product(&self, id: ProductId) -> CatalogResult<ApiResponse<()>> {
        self.simulate(Operation::DeleteProduct).await?;
        self.store().remove_product(id)?;
        Ok(ApiResponse::ok((), "Product deleted successfully"))
    }

    async fn list_categories(&self) -> CatalogResult<ApiResponse<Vec<Category>>> {
        self.simulate(Operation::ListCategories).await?;
        let categories = self.all_categories();
        Ok(ApiResponse::ok(categories, "Categories retrieved successfully"))
    }

    async fn list_products_by_category(
        &self,
        category: CategoryId,
        filters: &ProductFilters,
    ) -> CatalogResult<PaginatedResponse<Product>> {
        self.simulate(Operation::ProductsByCategory).await?;
        let filters = filters.clone().with_category(category);
        let products = {
            let store = self.store();
            store.category(category)?;
            store.matching(&filters)
        };
        Ok(PaginatedResponse::single_page(products))
    }

    async fn search_products(
        &self,
        query: &str,
        filters: &ProductFilters,
    ) -> CatalogResult<PaginatedResponse<Product>> {
        self.simulate(Operation::SearchProducts).await?;
        let filters = filters.clone().with_search(query);
        let products = self.store().matching(&filters);
        Ok(PaginatedResponse::single_page(products))
    }

    async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> CatalogResult<ApiResponse<Category>> {
        request.validate()?;
        self.simulate(Operation::WriteCategory).await?;
        let category = self.store().insert_category(request)?;
        Ok(ApiResponse::ok(category, "Category created successfully"))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        request: &UpdateCategoryRequest,
    ) -> CatalogResult<ApiResponse<Category>> {
        request.validate()?;
        self.simulate(Operation::WriteCategory).await?;
        let category = self.store().update_category(id, request)?;
        Ok(ApiResponse::ok(category, "Category updated successfully"))
    }

    async fn delete_category(&self, id: CategoryId) -> CatalogResult<ApiResponse<()>> {
        self.simulate(Operation::WriteCategory).await?;
        self.store().remove_category(id)?;
        Ok(ApiResponse::ok((), "Category deleted successfully"))
    }

    async fn test_connection(&self) -> ConnectionReport {
        ConnectionReport {
            mode: ProviderMode::Mock,
            base_url: None,
            reachable: true,
            round_trip_ms: 0,
            categories: self.store().categories.len(),
            error: None,
        }
    }
}

/// The mutable catalog copy.
#[derive(Debug)]
struct Store {
    categories: Vec<Category>,
    products: Vec<Product>,
    next_product_id: ProductId,
    next_category_id: CategoryId,
}

impl Store {
    fn from_seed(seed: &SeedData) -> Self {
        Self {
            categories: seed.categories.clone(),
            products: seed.products.clone(),
            next_product_id: seed.next_product_id(),
            next_category_id: seed.next_category_id(),
        }
    }

    fn matching(&self, filters: &ProductFilters) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| filters.matches(p))
            .cloned()
            .collect()
    }

    fn position(&self, id: ProductId) -> CatalogResult<usize> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    fn product(&self, id: ProductId) -> CatalogResult<Product> {
        self.position(id).map(|idx| self.products[idx].clone())
    }

    fn category(&self, id: CategoryId) -> CatalogResult<&Category> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CatalogError::category_not_found(id))
    }

    fn insert_product(
        &mut self,
        request: &CreateProductRequest,
        now: DateTime<Utc>,
    ) -> CatalogResult<Product> {
        let category = resolve_category(&self.categories, &request.category)?;
        let id = self.next_product_id;
        self.next_product_id = id.next();

        let product = Product::from_request(id, request, category, now);
        self.products.push(product.clone());
        Ok(product)
    }

    fn update_product(
        &mut self,
        id: ProductId,
        request: &UpdateProductRequest,
        now: DateTime<Utc>,
    ) -> CatalogResult<Product> {
        let idx = self.position(id)?;
        let category = request
            .category
            .as_deref()
            .map(|reference| resolve_category(&self.categories, reference))
            .transpose()?;

        let product = &mut self.products[idx];
        product.apply_update(request, category, now);
        Ok(product.clone())
    }

    fn remove_product(&mut self, id: ProductId) -> CatalogResult<Product> {
        let idx = self.position(id)?;
        Ok(self.products.remove(idx))
    }

    fn insert_category(&mut self, request: &CreateCategoryRequest) -> CatalogResult<Category> {
        let name = request.name.trim();
        if name_taken(&self.categories, name, None) {
            return Err(duplicate_category(name));
        }

        let id = self.next_category_id;
        self.next_category_id = id.next();

        let category = Category {
            id,
            name: name.to_string(),
            description: non_blank(request.description.as_deref()),
        };
        self.categories.push(category.clone());
        Ok(category)
    }

    fn update_category(
        &mut self,
        id: CategoryId,
        request: &UpdateCategoryRequest,
    ) -> CatalogResult<Category> {
        self.category(id)?;
        if let Some(name) = request.name.as_deref().map(str::trim) {
            if name_taken(&self.categories, name, Some(id)) {
                return Err(duplicate_category(name));
            }
        }

        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CatalogError::category_not_found(id))?;
        if let Some(name) = &request.name {
            category.name = name.trim().to_string();
        }
        if request.description.is_some() {
            category.description = non_blank(request.description.as_deref());
        }
        Ok(category.clone())
    }

    /// Categories still referenced by products are kept.
    fn remove_category(&mut self, id: CategoryId) -> CatalogResult<Category> {
        let name = self.category(id)?.name.clone();
        let in_use = self.products.iter().filter(|p| p.category == id).count();
        if in_use > 0 {
            return Err(CatalogError::Validation(format!(
                "Category \"{}\" still has {} products",
                name, in_use
            )));
        }

        let idx = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CatalogError::category_not_found(id))?;
        Ok(self.categories.remove(idx))
    }
}

fn duplicate_category(name: &str) -> CatalogError {
    CatalogError::Validation(format!("Category \"{}\" already exists", name))
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn provider() -> SimulatedProvider {
        SimulatedProvider::new(SeedData::demo(), SimulationProfile::instant()).with_seed(7)
    }

    fn failing() -> SimulatedProvider {
        SimulatedProvider::new(
            SeedData::demo(),
            SimulationProfile::instant().with_failure_rate(1.0),
        )
        .with_seed(7)
    }

    fn ids(page: &PaginatedResponse<Product>) -> Vec<i64> {
        page.data.iter().map(|p| p.id.get()).collect()
    }

    #[tokio::test]
    async fn test_list_without_filters_returns_everything() {
        let page = provider().list_products(&ProductFilters::new()).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page.total, 10);
        assert_eq!(page.limit, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_filters_are_conjunctive() {
        let filters = ProductFilters::new()
            .with_search("NIKE")
            .with_category(CategoryId::new(2))
            .with_price_range(None, Some(Price::from_units(100_000)));

        let page = provider().list_products(&filters).await.unwrap();
        assert_eq!(ids(&page), vec![3]);
    }

    #[tokio::test]
    async fn test_price_bounds_are_inclusive() {
        let filters = ProductFilters::new().with_price_range(
            Some(Price::from_units(85_000)),
            Some(Price::from_units(95_000)),
        );
        let page = provider().list_products(&filters).await.unwrap();
        assert_eq!(ids(&page), vec![3, 6, 10]);
    }

    #[tokio::test]
    async fn test_search_matches_name_or_description() {
        let page = provider()
            .search_products("air", &ProductFilters::new())
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![2, 7, 8]);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let provider = provider();
        let request = CreateProductRequest::new("Balón de Baloncesto", Price::from_units(150_000), "Deportes")
            .with_description("Balón oficial talla 7")
            .with_stock(9);

        let created = provider.create_product(&request).await.unwrap().into_data();
        assert_eq!(created.id, ProductId::new(11));
        assert_eq!(created.category, CategoryId::new(4));
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.image, None);

        let fetched = provider.get_product(created.id).await.unwrap().into_data();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_accepts_numeric_category_reference() {
        let request = CreateProductRequest::new("Lámpara", Price::from_units(60_000), "3");
        let created = provider().create_product(&request).await.unwrap().into_data();
        assert_eq!(created.category, CategoryId::new(3));
    }

    #[tokio::test]
    async fn test_create_with_unknown_category_fails_without_writing() {
        let provider = provider();
        let request = CreateProductRequest::new("Dron", Price::from_units(900_000), "Juguetes");

        let err = provider.create_product(&request).await.unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("Available categories are: Electrónicos, Ropa"));
        assert_eq!(provider.all_products().len(), 10);
    }

    #[tokio::test]
    async fn test_update_leaves_unspecified_fields() {
        let provider = provider();
        let before = provider.get_product(ProductId::new(4)).await.unwrap().into_data();

        let update = UpdateProductRequest {
            stock: Some(1),
            ..Default::default()
        };
        let after = provider
            .update_product(ProductId::new(4), &update)
            .await
            .unwrap()
            .into_data();

        assert_eq!(after.stock, 1);
        assert_eq!(after.name, before.name);
        assert_eq!(after.price, before.price);
        assert_eq!(after.category, before.category);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_update_resolves_category_reference() {
        let update = UpdateProductRequest {
            category: Some("Libros".to_string()),
            ..Default::default()
        };
        let updated = provider()
            .update_product(ProductId::new(1), &update)
            .await
            .unwrap()
            .into_data();
        assert_eq!(updated.category, CategoryId::new(5));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let err = provider()
            .update_product(ProductId::new(99), &UpdateProductRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::product_not_found(99));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let provider = provider();
        provider.delete_product(ProductId::new(5)).await.unwrap();

        let err = provider.get_product(ProductId::new(5)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Product with id 5 not found");

        let again = provider.delete_product(ProductId::new(5)).await.unwrap_err();
        assert!(again.is_not_found());
    }

    #[tokio::test]
    async fn test_identifiers_are_not_reused() {
        let provider = provider();
        provider.delete_product(ProductId::new(10)).await.unwrap();

        let request = CreateProductRequest::new("Agenda", Price::from_units(30_000), "Libros");
        let created = provider.create_product(&request).await.unwrap().into_data();
        assert_eq!(created.id, ProductId::new(11));
    }

    #[tokio::test]
    async fn test_by_category() {
        let provider = provider();
        let books = provider
            .list_products_by_category(CategoryId::new(5), &ProductFilters::new())
            .await
            .unwrap();
        assert_eq!(ids(&books), vec![6, 10]);

        let err = provider
            .list_products_by_category(CategoryId::new(42), &ProductFilters::new())
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::category_not_found(42));
    }

    #[tokio::test]
    async fn test_reset_restores_seed_state() {
        let provider = provider();
        provider.delete_product(ProductId::new(1)).await.unwrap();
        let request = CreateProductRequest::new("Gorra", Price::from_units(40_000), "Ropa");
        provider.create_product(&request).await.unwrap();

        provider.reset();

        assert_eq!(provider.all_products(), SeedData::demo().products);
        let created = provider.create_product(&request).await.unwrap().into_data();
        assert_eq!(created.id, ProductId::new(11));
    }

    #[tokio::test]
    async fn test_forced_failures() {
        let provider = failing();

        let err = provider.list_products(&ProductFilters::new()).await.unwrap_err();
        assert_eq!(err, CatalogError::Simulated("Simulated network error".to_string()));

        let request = CreateProductRequest::new("Gorra", Price::from_units(40_000), "Ropa");
        let err = provider.create_product(&request).await.unwrap_err();
        assert_eq!(err.kind(), "simulated");
        assert_eq!(provider.all_products().len(), 10);

        assert!(provider.list_categories().await.is_err());
        assert!(provider.delete_product(ProductId::new(1)).await.is_err());
        assert_eq!(provider.all_products().len(), 10);
    }

    #[tokio::test]
    async fn test_zero_rate_never_fails() {
        let provider = SimulatedProvider::new(
            SeedData::demo(),
            SimulationProfile::instant().with_failure_rate(0.0),
        );
        for _ in 0..200 {
            provider.list_products(&ProductFilters::new()).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_seeded_injection_is_deterministic() {
        let profile = SimulationProfile::instant().with_failure_rate(0.5);
        let a = SimulatedProvider::new(SeedData::demo(), profile).with_seed(42);
        let b = SimulatedProvider::new(SeedData::demo(), profile).with_seed(42);

        let mut outcomes_a = Vec::new();
        let mut outcomes_b = Vec::new();
        for _ in 0..32 {
            outcomes_a.push(a.list_categories().await.is_ok());
            outcomes_b.push(b.list_categories().await.is_ok());
        }
        assert_eq!(outcomes_a, outcomes_b);
        assert!(outcomes_a.contains(&true));
        assert!(outcomes_a.contains(&false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_operations_wait_their_latency() {
        let provider = SimulatedProvider::new(
            SeedData::demo(),
            SimulationProfile::realistic().with_failure_rate(0.0),
        );

        let start = tokio::time::Instant::now();
        provider.list_products(&ProductFilters::new()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(800));

        let start = tokio::time::Instant::now();
        provider.list_categories().await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let provider = provider();
        let requests: Vec<_> = (0..5)
            .map(|i| CreateProductRequest::new(format!("Item {}", i), Price::from_units(1_000), "Hogar"))
            .collect();

        let results =
            futures::future::join_all(requests.iter().map(|r| provider.create_product(r))).await;
        let mut ids: Vec<i64> = results
            .into_iter()
            .map(|r| r.unwrap().into_data().id.get())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![11, 12, 13, 14, 15]);
    }

    #[tokio::test]
    async fn test_category_writes() {
        let provider = provider();

        let toys = provider
            .create_category(&CreateCategoryRequest::new("Juguetes"))
            .await
            .unwrap()
            .into_data();
        assert_eq!(toys.id, CategoryId::new(6));

        let dup = provider
            .create_category(&CreateCategoryRequest::new("ropa"))
            .await
            .unwrap_err();
        assert_eq!(dup.to_string(), "Category \"ropa\" already exists");

        let renamed = provider
            .update_category(
                toys.id,
                &UpdateCategoryRequest {
                    name: Some("Juegos".to_string()),
                    description: Some("Juegos de mesa".to_string()),
                },
            )
            .await
            .unwrap()
            .into_data();
        assert_eq!(renamed.name, "Juegos");
        assert_eq!(renamed.description.as_deref(), Some("Juegos de mesa"));

        provider.delete_category(toys.id).await.unwrap();
        let missing = provider.delete_category(toys.id).await.unwrap_err();
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn test_category_in_use_is_kept() {
        let provider = provider();
        let err = provider.delete_category(CategoryId::new(5)).await.unwrap_err();
        assert_eq!(err.to_string(), "Category \"Libros\" still has 2 products");
        assert_eq!(provider.all_categories().len(), 5);
    }

    #[tokio::test]
    async fn test_connection_report_is_local() {
        let report = provider().test_connection().await;
        assert_eq!(report.mode, ProviderMode::Mock);
        assert!(report.reachable);
        assert_eq!(report.categories, 5);
    }
}
