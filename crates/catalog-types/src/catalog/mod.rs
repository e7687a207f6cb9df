//! Product catalog module.
//!
//! Contains products, categories and the write requests for both.

mod category;
mod product;

pub use category::{
    name_taken, resolve_category, Category, CreateCategoryRequest, UpdateCategoryRequest,
};
pub use product::{CreateProductRequest, Product, UpdateProductRequest};
