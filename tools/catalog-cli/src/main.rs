//! Catalog CLI - browse and edit the product catalog from a terminal.
//!
//! Commands:
//! - `catalog list` / `search` / `by-category` - List products
//! - `catalog get|create|update|delete` - Work with one product
//! - `catalog categories` / `category` - List and edit categories
//! - `catalog ping` - Check the active provider
//! - `catalog config` - Inspect configuration
//! - `catalog mock dump` - Inspect the simulated catalog

mod commands;
mod config;
mod context;
mod logging;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use catalog_service::{Environment, ProviderMode};
use clap::{Parser, Subcommand};

use commands::{
    ByCategoryArgs, CategoryArgs, ConfigArgs, CreateArgs, DeleteArgs, GetArgs, ListArgs, MockArgs,
    SearchArgs, UpdateArgs,
};
use context::{Context, Overrides};

/// Catalog CLI - browse and manage products against the mock or remote catalog
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Configuration profile (development or production)
    #[arg(long, global = true)]
    env: Option<Environment>,

    /// Serve from the simulated catalog
    #[arg(long, global = true, conflicts_with = "remote")]
    mock: bool,

    /// Serve from the backend API
    #[arg(long, global = true)]
    remote: bool,

    /// Backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let mode = if self.mock {
            Some(ProviderMode::Mock)
        } else if self.remote {
            Some(ProviderMode::Remote)
        } else {
            None
        };
        Overrides {
            config: self.config.clone(),
            env: self.env,
            mode,
            base_url: self.base_url.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    List(ListArgs),

    /// Show one product
    Get(GetArgs),

    /// Create a product
    Create(CreateArgs),

    /// Update fields of a product
    Update(UpdateArgs),

    /// Delete a product
    Delete(DeleteArgs),

    /// List categories
    Categories,

    /// List products in a category
    ByCategory(ByCategoryArgs),

    /// Search products
    Search(SearchArgs),

    /// Create, update or delete categories
    Category(CategoryArgs),

    /// Check connectivity of the active provider
    Ping,

    /// Inspect configuration
    Config(ConfigArgs),

    /// Simulated catalog maintenance
    Mock(MockArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let (config, source) = match context::resolve(&cli.overrides()) {
        Ok(resolved) => resolved,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    logging::init(&config, cli.verbose);

    let ctx = match Context::build(config, source, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    ctx.output.debug(&format!("provider mode: {}", ctx.selector.mode()));

    let result = match cli.command {
        Commands::List(args) => commands::products::list(args, &ctx).await,
        Commands::Get(args) => commands::products::get(args, &ctx).await,
        Commands::Create(args) => commands::products::create(args, &ctx).await,
        Commands::Update(args) => commands::products::update(args, &ctx).await,
        Commands::Delete(args) => commands::products::delete(args, &ctx).await,
        Commands::Categories => commands::categories::list(&ctx).await,
        Commands::ByCategory(args) => commands::products::by_category(args, &ctx).await,
        Commands::Search(args) => commands::products::search(args, &ctx).await,
        Commands::Category(args) => commands::categories::run(args, &ctx).await,
        Commands::Ping => commands::ping::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
        Commands::Mock(args) => commands::mock::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
