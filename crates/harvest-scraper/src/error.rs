use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("{context} response is missing `{field}`")]
    MissingField {
        context: String,
        field: &'static str,
    },

    #[error("product {product_id} has no permalink; detail cannot be fetched")]
    MissingPermalink { product_id: i64 },

    #[error("merged record for product {product_id} is not a valid enriched product: {source}")]
    Merge {
        product_id: i64,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("cannot build request URL from \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
