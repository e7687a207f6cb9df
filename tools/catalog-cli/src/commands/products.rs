//! Product commands.

use anyhow::Result;
use catalog_service::CatalogProvider;
use catalog_types::prelude::*;
use dialoguer::Confirm;

use super::{ByCategoryArgs, CreateArgs, DeleteArgs, GetArgs, ListArgs, SearchArgs, UpdateArgs};
use crate::context::Context;

pub async fn list(args: ListArgs, ctx: &Context) -> Result<()> {
    let filters = args.filters.to_filters();
    ctx.output.debug(&format!("filters: {:?}", filters));

    let spinner = ctx.output.spinner("Loading products...");
    let result = ctx.selector.list_products(&filters).await;
    spinner.finish_and_clear();

    ctx.output.products(&result?);
    Ok(())
}

pub async fn get(args: GetArgs, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner(&format!("Fetching product {}...", args.id));
    let result = ctx.selector.get_product(args.id).await;
    spinner.finish_and_clear();

    ctx.output.product(&result?.data);
    Ok(())
}

pub async fn create(args: CreateArgs, ctx: &Context) -> Result<()> {
    let mut request = CreateProductRequest::new(args.name, args.price, args.category)
        .with_description(args.description)
        .with_stock(args.stock);
    if let Some(image) = args.image {
        request = request.with_image(image);
    }

    let spinner = ctx.output.spinner("Creating product...");
    let result = ctx.selector.create_product(&request).await;
    spinner.finish_and_clear();

    let response = result?;
    ctx.output.success(&format!(
        "Created product {} ({})",
        response.data.id, response.data.name
    ));
    ctx.output.product(&response.data);
    Ok(())
}

pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let request = UpdateProductRequest {
        name: args.name,
        description: args.description,
        price: args.price,
        category: args.category,
        image: args.image,
        stock: args.stock,
    };
    if request.is_empty() {
        ctx.output.warn("Nothing to update");
        return Ok(());
    }

    let spinner = ctx.output.spinner(&format!("Updating product {}...", args.id));
    let result = ctx.selector.update_product(args.id, &request).await;
    spinner.finish_and_clear();

    let response = result?;
    ctx.output.success(&format!("Updated product {}", response.data.id));
    ctx.output.product(&response.data);
    Ok(())
}

pub async fn delete(args: DeleteArgs, ctx: &Context) -> Result<()> {
    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete product {}?", args.id))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Delete cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner(&format!("Deleting product {}...", args.id));
    let result = ctx.selector.delete_product(args.id).await;
    spinner.finish_and_clear();

    let response = result?;
    if ctx.output.is_json() {
        ctx.output.json(&response);
    } else {
        ctx.output.success(&format!("Deleted product {}", args.id));
    }
    Ok(())
}

pub async fn by_category(args: ByCategoryArgs, ctx: &Context) -> Result<()> {
    let filters = args.filters.to_filters();

    let spinner = ctx.output.spinner(&format!("Loading category {}...", args.id));
    let result = ctx.selector.list_products_by_category(args.id, &filters).await;
    spinner.finish_and_clear();

    ctx.output.products(&result?);
    Ok(())
}

pub async fn search(args: SearchArgs, ctx: &Context) -> Result<()> {
    let filters = args.filters.to_filters();

    let spinner = ctx.output.spinner(&format!("Searching for \"{}\"...", args.query));
    let result = ctx.selector.search_products(&args.query, &filters).await;
    spinner.finish_and_clear();

    ctx.output.products(&result?);
    Ok(())
}
