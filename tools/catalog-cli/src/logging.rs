//! Tracing subscriber setup.

use catalog_service::{CatalogConfig, LogFormat};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` forces debug and the
/// config's `enable_logging` picks between debug and warn. Logs go to
/// stderr so JSON command output stays clean.
pub fn init(config: &CatalogConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.log_level() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("catalog_service={level},catalog_fetch={level},warn")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed (tests, embedding).
    let _ = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.compact().try_init(),
    };
}
