use std::path::PathBuf;

use reqwest::Url;

/// Fixed collection/region filter sent as query parameters on every listing
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    /// e.g. `"CATEGORY_RENT"`.
    pub collection_type: String,
    /// City slug, e.g. `"noida"`.
    pub city: String,
    /// Collection slug, sent as both `collection` and `collectionName`.
    pub collection: String,
}

/// Static header set attached to every catalog request.
///
/// None of these values are derived from response data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHeaders {
    pub city_id: String,
    pub pincode: String,
    /// Value of the `moriarty` client identifier header, e.g. `"web-1.0"`.
    pub client_id: String,
    pub origin: String,
    pub user_agent: String,
}

#[derive(Clone)]
pub struct AppConfig {
    /// Listing endpoint. Detail URLs are `{catalog_base_url}/{permalink}`.
    pub catalog_base_url: Url,
    pub filter: CatalogFilter,
    pub headers: ClientHeaders,
    /// Directory holding the `products_YYYYMMDD.json` daily files.
    pub data_dir: PathBuf,
    pub poll_interval_secs: u64,
    pub item_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("catalog_base_url", &self.catalog_base_url.as_str())
            .field("filter", &self.filter)
            .field("city_id", &self.headers.city_id)
            .field("pincode", &self.headers.pincode)
            .field("client_id", &self.headers.client_id)
            .field("origin", &self.headers.origin)
            .field("data_dir", &self.data_dir)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("item_delay_ms", &self.item_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}
