//! Category commands.

use anyhow::Result;
use catalog_service::CatalogProvider;
use catalog_types::prelude::*;
use dialoguer::Confirm;

use super::{CategoryArgs, CategoryCommand};
use crate::context::Context;

/// List every category.
pub async fn list(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading categories...");
    let result = ctx.selector.list_categories().await;
    spinner.finish_and_clear();

    ctx.output.categories(&result?.data);
    Ok(())
}

pub async fn run(args: CategoryArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CategoryCommand::Create { name, description } => {
            let request = CreateCategoryRequest { name, description };
            let spinner = ctx.output.spinner("Creating category...");
            let result = ctx.selector.create_category(&request).await;
            spinner.finish_and_clear();

            let category = result?.data;
            ctx.output
                .success(&format!("Created category {} ({})", category.id, category.name));
            ctx.output.categories(std::slice::from_ref(&category));
        }
        CategoryCommand::Update {
            id,
            name,
            description,
        } => {
            let request = UpdateCategoryRequest { name, description };
            let spinner = ctx.output.spinner(&format!("Updating category {}...", id));
            let result = ctx.selector.update_category(id, &request).await;
            spinner.finish_and_clear();

            let category = result?.data;
            ctx.output.success(&format!("Updated category {}", category.id));
            ctx.output.categories(std::slice::from_ref(&category));
        }
        CategoryCommand::Delete { id, yes } => {
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete category {}?", id))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Delete cancelled");
                    return Ok(());
                }
            }

            let spinner = ctx.output.spinner(&format!("Deleting category {}...", id));
            let result = ctx.selector.delete_category(id).await;
            spinner.finish_and_clear();

            let response = result?;
            if ctx.output.is_json() {
                ctx.output.json(&response);
            } else {
                ctx.output.success(&format!("Deleted category {}", id));
            }
        }
    }
    Ok(())
}
