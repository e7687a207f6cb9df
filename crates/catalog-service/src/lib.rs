//! Catalog data providers behind one contract.
//!
//! - [`SimulatedProvider`]: in-process seed catalog with injected latency
//!   and failures
//! - [`RemoteProvider`]: the HTTP backend, adapted to the uniform envelopes
//! - [`ProviderSelector`]: routes each call to whichever is active
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_service::prelude::*;
//!
//! let selector = ProviderSelector::from_config(&CatalogConfig::development())?;
//! let page = selector.list_products(&ProductFilters::new().with_search("nike")).await?;
//!
//! selector.set_mode(ProviderMode::Remote);
//! let categories = selector.list_categories().await?;
//! ```

pub mod config;
pub mod provider;
pub mod remote;
pub mod selector;
pub mod simulated;

pub use config::{CatalogConfig, ConfigError, Environment, LogFormat};
pub use provider::{CatalogProvider, ConnectionReport, ProviderMode};
pub use remote::RemoteProvider;
pub use selector::ProviderSelector;
pub use simulated::{SeedData, SimulatedProvider, SimulationProfile};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogConfig, CatalogProvider, ConnectionReport, ProviderMode, ProviderSelector,
        RemoteProvider, SimulatedProvider, SimulationProfile,
    };
    pub use catalog_types::prelude::*;
}
