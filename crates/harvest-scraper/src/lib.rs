pub mod client;
pub mod error;
pub mod merge;
pub mod types;

pub use client::CatalogClient;
pub use error::ScraperError;
pub use merge::merge_product;
pub use types::CatalogListing;
