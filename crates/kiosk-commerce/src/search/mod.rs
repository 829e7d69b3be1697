//! Search module.
//!
//! Contains the category filter, free-text search, pagination and facets.

mod query;
mod filter;
mod results;

pub use query::{apply_search, SearchText};
pub use filter::{apply_category_filter, CategorySelection, FilterMode, FilterState};
pub use results::{category_facets, paginate, total_pages, CategoryFacet, Page, Pagination};
