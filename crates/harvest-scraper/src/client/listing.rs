//! Catalog listing fetch for `CatalogClient`.

use crate::error::ScraperError;
use crate::types::{CatalogListing, ListingEnvelope};

use super::{parse_body, CatalogClient};

const CONTEXT: &str = "catalog listing";

impl CatalogClient {
    /// Fetches the current catalog listing for the configured filter.
    ///
    /// One request, no pagination: whatever the API returns in
    /// `data.products` is the full listing. Entries are returned as raw JSON
    /// objects; callers decode each one individually.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] / [`ScraperError::UnexpectedStatus`] — non-2xx.
    /// - [`ScraperError::Http`] — network or TLS failure.
    /// - [`ScraperError::Deserialize`] — body is not JSON, or `products` is not an array.
    /// - [`ScraperError::MissingField`] — `data` or `data.products` is absent.
    pub async fn list_products(&self) -> Result<CatalogListing, ScraperError> {
        let body = self.get_body(self.listing_url()).await?;
        let envelope: ListingEnvelope = parse_body(&body, CONTEXT)?;

        let data = envelope.data.ok_or_else(|| ScraperError::MissingField {
            context: CONTEXT.to_owned(),
            field: "data",
        })?;
        let products = data.products.ok_or_else(|| ScraperError::MissingField {
            context: CONTEXT.to_owned(),
            field: "data.products",
        })?;

        Ok(CatalogListing::new(products))
    }
}
