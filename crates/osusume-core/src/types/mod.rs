pub mod catalog;
pub mod recommendation;
pub mod request;

pub use catalog::{Catalog, CatalogEntry};
pub use recommendation::Recommendation;
pub use request::{RecommendRequest, DEFAULT_TOP_K};
