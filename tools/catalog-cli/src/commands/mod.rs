//! CLI command implementations.

pub mod categories;
pub mod config;
pub mod mock;
pub mod ping;
pub mod products;

use catalog_types::prelude::*;
use clap::{Args, Subcommand};

/// Filter flags shared by listing commands.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Case-insensitive text matched against name or description.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category identifier.
    #[arg(short, long)]
    pub category: Option<CategoryId>,

    /// Minimum price, inclusive.
    #[arg(long)]
    pub min_price: Option<Price>,

    /// Maximum price, inclusive.
    #[arg(long)]
    pub max_price: Option<Price>,

    /// Page number (remote only).
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size (remote only).
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl FilterArgs {
    pub fn to_filters(&self) -> ProductFilters {
        ProductFilters {
            search: self.search.clone(),
            category: self.category,
            min_price: self.min_price,
            max_price: self.max_price,
            page: self.page.map(|p| p.max(1)),
            page_size: self.page_size.map(|s| s.max(1)),
        }
    }
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the get command.
#[derive(Args)]
pub struct GetArgs {
    /// Product identifier.
    pub id: ProductId,
}

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    #[arg(short, long)]
    pub name: String,

    #[arg(short, long, default_value = "")]
    pub description: String,

    #[arg(short, long)]
    pub price: Price,

    /// Category name or identifier.
    #[arg(short, long)]
    pub category: String,

    #[arg(short, long, default_value_t = 0)]
    pub stock: u32,

    /// Image URL.
    #[arg(long)]
    pub image: Option<String>,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product identifier.
    pub id: ProductId,

    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub price: Option<Price>,

    /// Category name or identifier.
    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(short, long)]
    pub stock: Option<u32>,

    /// Image URL; an empty value clears it.
    #[arg(long)]
    pub image: Option<String>,
}

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Product identifier.
    pub id: ProductId,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the by-category command.
#[derive(Args)]
pub struct ByCategoryArgs {
    /// Category identifier.
    #[arg(value_name = "CATEGORY")]
    pub id: CategoryId,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search text.
    pub query: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the category command.
#[derive(Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    pub command: CategoryCommand,
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// Create a category
    Create {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Rename or describe a category
    Update {
        id: CategoryId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a category
    Delete {
        id: CategoryId,
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the path of the configuration file in use
    Path,
}

/// Arguments for the mock command.
#[derive(Args)]
pub struct MockArgs {
    #[command(subcommand)]
    pub command: MockCommand,
}

#[derive(Subcommand)]
pub enum MockCommand {
    /// Print every product held by the simulated catalog
    Dump,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_conversion() {
        let args = FilterArgs {
            search: Some("nike".to_string()),
            category: Some(CategoryId::new(2)),
            page: Some(0),
            ..Default::default()
        };
        let filters = args.to_filters();
        assert_eq!(filters.search.as_deref(), Some("nike"));
        assert_eq!(filters.category, Some(CategoryId::new(2)));
        assert_eq!(filters.page, Some(1));
        assert!(FilterArgs::default().to_filters().is_empty());
    }
}
