//! Product catalog lookup

pub mod errors;
pub mod models;
pub mod repository;

pub use errors::CatalogError;
pub use repository::*;
