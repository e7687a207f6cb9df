//! Configuration inspection.

use anyhow::Result;

use super::{ConfigArgs, ConfigCommand};
use crate::config;
use crate::context::Context;

pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => {
            match &ctx.source {
                Some(path) => println!("{}", path.display()),
                None => ctx.output.info("No config file found; using defaults"),
            }
            Ok(())
        }
    }
}

fn show(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Effective configuration");
    match &ctx.source {
        Some(path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "defaults"),
    }
    println!();
    print!("{}", config::render(&ctx.config)?);
    Ok(())
}
