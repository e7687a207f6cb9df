//! Simulated catalog maintenance.

use anyhow::Result;

use super::{MockArgs, MockCommand};
use crate::context::Context;

pub async fn run(args: MockArgs, ctx: &Context) -> Result<()> {
    match args.command {
        MockCommand::Dump => {
            let products = ctx.selector.dump_all_mock_products();
            if !ctx.selector.mode().is_mock() {
                ctx.output
                    .warn("Simulated catalog is not active; pass --mock to inspect it");
                return Ok(());
            }
            if ctx.output.is_json() {
                ctx.output.json(&products);
            } else {
                ctx.output.header(&format!("Simulated catalog ({} products)", products.len()));
                for product in &products {
                    ctx.output.kv(&product.id.to_string(), &product.name);
                }
            }
        }
    }
    Ok(())
}
