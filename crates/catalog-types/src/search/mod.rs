//! Search module.
//!
//! Contains filter criteria and the response envelopes.

mod filter;
mod results;

pub use filter::ProductFilters;
pub use results::{ApiResponse, PaginatedResponse};
