//! Catalog

pub mod errors;
pub mod models;
mod service;

pub use errors::CatalogError;
pub use models::{ALL_PRODUCTS_TITLE, ProductDraft, ProductsPage};
pub use service::CatalogService;
