pub mod catalog;
mod models;
mod service;

pub use models::{Activity, RawActivity};
pub use service::{ActivityService, ActivitySource, CatalogError};
