//! Latency and failure-injection settings for the simulated provider.

use std::time::Duration;

/// Operations the simulated provider distinguishes when injecting
/// latency and failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListProducts,
    GetProduct,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    ListCategories,
    ProductsByCategory,
    SearchProducts,
    /// Category create, update and delete.
    WriteCategory,
}

impl Operation {
    /// Stable name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListProducts => "list_products",
            Self::GetProduct => "get_product",
            Self::CreateProduct => "create_product",
            Self::UpdateProduct => "update_product",
            Self::DeleteProduct => "delete_product",
            Self::ListCategories => "list_categories",
            Self::ProductsByCategory => "products_by_category",
            Self::SearchProducts => "search_products",
            Self::WriteCategory => "write_category",
        }
    }

    /// Message carried by an injected failure.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::ListProducts | Self::SearchProducts => "Simulated network error",
            Self::GetProduct => "Product not found",
            Self::CreateProduct => "Failed to create product",
            Self::UpdateProduct => "Failed to update product",
            Self::DeleteProduct => "Failed to delete product",
            Self::ListCategories => "Failed to load categories",
            Self::ProductsByCategory => "Failed to load products for category",
            Self::WriteCategory => "Failed to save category",
        }
    }

    /// Built-in delay and failure probability.
    pub fn defaults(&self) -> OperationProfile {
        let (millis, rate) = match self {
            Self::ListProducts | Self::SearchProducts => (800, 0.05),
            Self::GetProduct => (500, 0.02),
            Self::CreateProduct => (1000, 0.03),
            Self::UpdateProduct => (800, 0.02),
            Self::DeleteProduct => (600, 0.02),
            Self::ListCategories => (300, 0.01),
            Self::ProductsByCategory => (700, 0.0),
            Self::WriteCategory => (500, 0.02),
        };
        OperationProfile::new(Duration::from_millis(millis), rate)
    }
}

/// Delay and failure probability applied to one operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationProfile {
    /// Artificial latency before the operation runs.
    pub delay: Duration,
    /// Probability in `[0, 1]` that the operation fails.
    pub failure_rate: f64,
}

impl OperationProfile {
    /// Create a profile, clamping the rate into `[0, 1]`.
    pub fn new(delay: Duration, failure_rate: f64) -> Self {
        Self {
            delay,
            failure_rate: clamp_rate(failure_rate),
        }
    }
}

/// Simulation settings for every operation.
///
/// Without overrides each operation uses [`Operation::defaults`]. An
/// override replaces the value for all operations at once.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationProfile {
    delay: Option<Duration>,
    failure_rate: Option<f64>,
}

impl SimulationProfile {
    /// Built-in per-operation latency and failure rates.
    pub fn realistic() -> Self {
        Self::default()
    }

    /// No latency and no injected failures.
    pub fn instant() -> Self {
        Self::default()
            .with_delay(Duration::ZERO)
            .with_failure_rate(0.0)
    }

    /// Use one delay for every operation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Use one failure probability for every operation.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = Some(clamp_rate(rate));
        self
    }

    /// Effective settings for an operation.
    pub fn for_operation(&self, op: Operation) -> OperationProfile {
        let defaults = op.defaults();
        OperationProfile {
            delay: self.delay.unwrap_or(defaults.delay),
            failure_rate: self.failure_rate.unwrap_or(defaults.failure_rate),
        }
    }
}

fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}
