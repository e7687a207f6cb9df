//! Configuration file discovery and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog_service::CatalogConfig;

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["catalog.toml", ".catalog.toml", "catalog.json"];

/// Load a config file, TOML or JSON by extension.
pub fn load(path: &Path) -> Result<CatalogConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse(&content, is_json(path))
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse config text.
pub fn parse(content: &str, json: bool) -> Result<CatalogConfig> {
    let config = if json {
        serde_json::from_str(content)?
    } else {
        toml::from_str(content)?
    };
    Ok(config)
}

/// Find the nearest config file from `start` upward.
pub fn find(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Render the effective configuration as TOML.
pub fn render(config: &CatalogConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to render configuration")
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_service::{LogFormat, ProviderMode};

    #[test]
    fn test_parse_toml() {
        let config = parse(
            r#"
            use_mock_data = false
            api_base_url = "https://catalog.example.com/api"
            mock_delay_ms = 0
            "#,
            false,
        )
        .unwrap();
        assert_eq!(config.mode(), ProviderMode::Remote);
        assert_eq!(config.api_base_url, "https://catalog.example.com/api");
        assert_eq!(config.mock_delay_ms, Some(0));
    }

    #[test]
    fn test_parse_json() {
        let config = parse(r#"{"error_rate": 0.1, "log_format": "json"}"#, true).unwrap();
        assert_eq!(config.error_rate, Some(0.1));
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.use_mock_data);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("use_mock_data = \"maybe\"", false).is_err());
    }

    #[test]
    fn test_render_round_trips() {
        let config = CatalogConfig::development();
        let text = render(&config).unwrap();
        assert_eq!(parse(&text, false).unwrap(), config);
    }

    #[test]
    fn test_json_detection() {
        assert!(is_json(Path::new("/etc/catalog.json")));
        assert!(!is_json(Path::new("catalog.toml")));
    }
}
