//! Connectivity check.

use anyhow::{bail, Result};
use catalog_service::CatalogProvider;

use crate::context::Context;
use crate::output::mode_badge;

pub async fn run(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Checking catalog connection...");
    let report = ctx.selector.test_connection().await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&report);
    } else {
        ctx.output.header("Catalog connection");
        ctx.output.kv("mode", &mode_badge(report.mode));
        if let Some(url) = &report.base_url {
            ctx.output.kv("base url", url);
        }
        ctx.output.kv("round trip", &format!("{} ms", report.round_trip_ms));
        ctx.output.kv("categories", &report.categories.to_string());
    }

    if !report.reachable {
        bail!(report
            .error
            .unwrap_or_else(|| "catalog backend unreachable".to_string()));
    }
    ctx.output.success("Catalog reachable");
    Ok(())
}
