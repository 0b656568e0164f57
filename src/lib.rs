pub mod api;
pub mod catalog;
pub mod cli;
pub mod database_ops;
pub mod error;
pub mod logging;
pub mod model;
pub mod normalization;
pub mod views;

pub mod util {
    pub mod env;
}

pub use catalog::CatalogService;
pub use model::{Catalog, Document, MovieRecord};
