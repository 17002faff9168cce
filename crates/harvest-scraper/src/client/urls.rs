//! Request URL construction for the catalogue endpoints.

use reqwest::Url;

use crate::error::ScraperError;

use super::CatalogClient;

impl CatalogClient {
    /// Builds the listing URL: the base URL with the collection filter as
    /// query parameters.
    ///
    /// The collection slug is sent twice, as `collection` and
    /// `collectionName`; the API filters on either depending on the vertical.
    #[must_use]
    pub fn listing_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("collectionType", &self.filter.collection_type)
            .append_pair("city", &self.filter.city)
            .append_pair("collection", &self.filter.collection)
            .append_pair("collectionName", &self.filter.collection);
        url
    }

    /// Builds the detail URL for one permalink, appended to the base path as
    /// a single percent-encoded segment.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the base URL cannot carry a
    /// path (e.g. `mailto:`).
    pub fn detail_url(&self, permalink: &str) -> Result<Url, ScraperError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| ScraperError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "base URL cannot carry path segments".to_string(),
            })?
            .pop_if_empty()
            .push(permalink);
        Ok(url)
    }
}
