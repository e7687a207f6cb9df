//! Routes catalog calls to the active provider.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use catalog_types::prelude::*;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::provider::{CatalogProvider, ConnectionReport, ProviderMode};
use crate::remote::RemoteProvider;
use crate::simulated::SimulatedProvider;

/// Single entry point for presentation code.
///
/// The provider is chosen when a call starts; switching modes affects
/// the next call, never one already in flight. Results and errors pass
/// through untouched.
pub struct ProviderSelector {
    simulated: Arc<SimulatedProvider>,
    remote: Arc<dyn CatalogProvider>,
    use_mock: AtomicBool,
}

impl ProviderSelector {
    pub fn new(
        simulated: Arc<SimulatedProvider>,
        remote: Arc<dyn CatalogProvider>,
        mode: ProviderMode,
    ) -> Self {
        Self {
            simulated,
            remote,
            use_mock: AtomicBool::new(mode.is_mock()),
        }
    }

    /// Build both providers from configuration.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        config
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let mut simulated = SimulatedProvider::demo().with_profile(config.simulation_profile());
        if let Some(seed) = config.seed {
            simulated = simulated.with_seed(seed);
        }
        let remote = RemoteProvider::connect(config.api_base_url.clone(), config.timeout())?;

        Ok(Self::new(Arc::new(simulated), Arc::new(remote), config.mode()))
    }

    pub fn mode(&self) -> ProviderMode {
        if self.use_mock.load(Ordering::SeqCst) {
            ProviderMode::Mock
        } else {
            ProviderMode::Remote
        }
    }

    /// Switch providers for subsequent calls.
    pub fn set_mode(&self, mode: ProviderMode) {
        let previous = self.mode();
        self.use_mock.store(mode.is_mock(), Ordering::SeqCst);
        if previous != mode {
            info!(from = %previous, to = %mode, "catalog provider switched");
        }
    }

    /// The provider serving the next call.
    pub fn active(&self) -> Arc<dyn CatalogProvider> {
        match self.mode() {
            ProviderMode::Mock => self.simulated.clone(),
            ProviderMode::Remote => self.remote.clone(),
        }
    }

    pub fn simulated(&self) -> &Arc<SimulatedProvider> {
        &self.simulated
    }

    /// Restore the simulated catalog to its seed. No-op in remote mode.
    pub fn reset_mock_data(&self) {
        if !self.mode().is_mock() {
            warn!("reset_mock_data ignored: remote provider is active");
            return;
        }
        self.simulated.reset();
    }

    /// Every simulated product, unfiltered. Empty in remote mode.
    pub fn dump_all_mock_products(&self) -> Vec<Product> {
        if !self.mode().is_mock() {
            warn!("dump_all_mock_products ignored: remote provider is active");
            return Vec::new();
        }
        self.simulated.all_products()
    }
}

#[async_trait]
impl CatalogProvider for ProviderSelector {
    fn mode(&self) -> ProviderMode {
        ProviderSelector::mode(self)
    }

    async fn list_products(
        &self,
        filters: &ProductFilters,
    ) -> CatalogResult<PaginatedResponse<Product>> {
        let provider = self.active();
        debug!(mode = %provider.mode(), ?filters, "list_products");
        provider.list_products(filters).await
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<ApiResponse<Product>> {
        let provider = self.active();
        debug!(mode = %provider.mode(), %id, "get_product");
        provider.get_product(id).await
    }

    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> CatalogResult<ApiResponse<Product>> {
        let provider = self.active();
        debug!(mode = %provider.mode(), name = %request.name, category = %request.category, "create_product");
        provider.create_product(request).await
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: &UpdateProductRequest,
    ) -> CatalogResult<ApiResponse<Product>> {
        let provider = self.active();
        debug!(mode = %provider.mode(), %id, "update_product");
        provider.update_product(id, request).await
    }

    async fn delete_product(&self, id: ProductId) -> CatalogResult<ApiResponse<()>> {
        let provider = self.active();
        debug!(mode = %provider.mode(), %id, "delete_product");
        provider.delete_product(id).await
    }

    async fn list_categories(&self) -> CatalogResult<ApiResponse<Vec<Category>>> {
        let provider = self.active();
        debug!(mode = %provider.mode(), "list_categories");
        provider.list_categories().await
    }

    async fn list_products_by_category(
        &self,
        category: CategoryId,
        filters: &ProductFilters,
    ) -> CatalogResult<PaginatedResponse<Product>> {
        let provider = self.active();
        debug!(mode = %provider.mode(), %category, ?filters, "list_products_by_category");
        provider.list_products_by_category(category, filters).await
    }

    async fn search_products(
        &self,
        query: &str,
        filters: &ProductFilters,
    ) -> CatalogResult<PaginatedResponse<Product>> {
        let provider = self.active();
        debug!(mode = %provider.mode(), query, ?filters, "search_products");
        provider.search_products(query, filters).await
    }

    async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> CatalogResult<ApiResponse<Category>> {
        let provider = self.active();
        debug!(mode = %provider.mode(), name = %request.name, "create_category");
        provider.create_category(request).await
    }

    async fn update_category(
        &self,
        id: CategoryId,
        request: &UpdateCategoryRequest,
    ) -> CatalogResult<ApiResponse<Category>> {
        let provider = self.active();
        debug!(mode = %provider.mode(), %id, "update_category");
        provider.update_category(id, request).await
    }

    async fn delete_category(&self, id: CategoryId) -> CatalogResult<ApiResponse<()>> {
        let provider = self.active();
        debug!(mode = %provider.mode(), %id, "delete_category");
        provider.delete_category(id).await
    }

    async fn test_connection(&self) -> ConnectionReport {
        let provider = self.active();
        debug!(mode = %provider.mode(), "test_connection");
        provider.test_connection().await
    }
}
