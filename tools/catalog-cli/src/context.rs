//! CLI execution context.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use catalog_service::{CatalogConfig, Environment, ProviderMode, ProviderSelector};

use crate::config;
use crate::output::Output;

/// Global options that shape the configuration.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub env: Option<Environment>,
    pub mode: Option<ProviderMode>,
    pub base_url: Option<String>,
}

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration after profile and flags.
    pub config: CatalogConfig,
    /// Where the configuration was read from, if anywhere.
    pub source: Option<PathBuf>,
    pub output: Output,
    pub selector: ProviderSelector,
}

impl Context {
    /// Build the provider selector from an already resolved configuration.
    pub fn build(config: CatalogConfig, source: Option<PathBuf>, output: Output) -> Result<Self> {
        let selector = ProviderSelector::from_config(&config)
            .context("Invalid catalog configuration")?;

        Ok(Self {
            config,
            source,
            output,
            selector,
        })
    }
}

/// File (explicit or discovered), then profile, then flags.
pub fn resolve(overrides: &Overrides) -> Result<(CatalogConfig, Option<PathBuf>)> {
    let source = match &overrides.config {
        Some(path) => Some(path.clone()),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            config::find(&cwd)
        }
    };

    let mut effective = match &source {
        Some(path) => config::load(path)?,
        None => CatalogConfig::default(),
    };

    if let Some(env) = overrides.env {
        effective = effective.with_environment(env);
    }
    if let Some(mode) = overrides.mode {
        effective = effective.with_mode(mode);
    }
    if let Some(url) = &overrides.base_url {
        effective = effective.with_base_url(url.clone());
    }

    Ok((effective, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let overrides = Overrides {
            config: Some(PathBuf::from("/nonexistent/catalog.toml")),
            ..Default::default()
        };
        assert!(resolve(&overrides).is_err());
    }

    #[test]
    fn test_overrides_apply_in_order() {
        let dir = std::env::temp_dir().join(format!("catalog-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.toml");
        std::fs::write(&path, "api_base_url = \"http://files.example/api\"\n").unwrap();

        let overrides = Overrides {
            config: Some(path.clone()),
            env: Some(Environment::Production),
            mode: Some(ProviderMode::Mock),
            base_url: None,
        };
        let (config, source) = resolve(&overrides).unwrap();
        assert_eq!(source, Some(path));
        assert_eq!(config.api_base_url, "http://files.example/api");
        assert_eq!(config.mode(), ProviderMode::Mock);
        assert!(!config.enable_logging);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_resolve_defers_validation_to_build() {
        let overrides = Overrides {
            config: None,
            env: None,
            mode: Some(ProviderMode::Remote),
            base_url: Some("no scheme here".to_string()),
        };
        let (config, source) = resolve(&overrides).unwrap();
        assert_eq!(config.api_base_url, "no scheme here");

        let err = Context::build(config.clone(), source.clone(), Output::new(false, true))
            .err()
            .unwrap();
        assert!(format!("{:#}", err).contains("Invalid catalog configuration"));

        let fixed = config.with_base_url("http://localhost:8000/api");
        let ctx = Context::build(fixed, source, Output::new(false, true)).unwrap();
        assert_eq!(ctx.selector.mode(), ProviderMode::Remote);
    }
}
