//! Response envelopes for the catalogue API.
//!
//! ## Observed shape
//!
//! Both endpoints wrap their payload in a top-level `data` object.
//!
//! ### Listing: `GET /api/v1/catalogue/products?collectionType=..&city=..`
//! `data.products` is an array of summary objects. The array is kept as raw
//! JSON here; each entry is decoded into a `ProductSummary` individually so
//! one malformed entry cannot sink the whole listing.
//!
//! ### Detail: `GET /api/v1/catalogue/products/{permalink}`
//! `data` is a single object carrying the summary keys plus
//! `description`, `specifications`, `variantConfiguration`, `collection`,
//! `features`, `dimensions`, and `additionalInfo`. Some of those are `null`
//! on sparse items. It may also carry its own `pricing`, which is ignored
//! during merge.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Upper bound on how much of a payload is copied into a log line.
const EXCERPT_CHARS: usize = 512;

/// Result of one listing call.
#[derive(Debug, Clone)]
pub struct CatalogListing {
    pub total_count: usize,
    /// Raw summary objects in listing order.
    pub products: Vec<Value>,
}

impl CatalogListing {
    #[must_use]
    pub fn new(products: Vec<Value>) -> Self {
        Self {
            total_count: products.len(),
            products,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingEnvelope {
    #[serde(default)]
    pub data: Option<ListingData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData {
    #[serde(default)]
    pub products: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailEnvelope {
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

/// Returns at most [`EXCERPT_CHARS`] characters of `payload`, cut on a char
/// boundary.
#[must_use]
pub fn excerpt(payload: &str) -> &str {
    match payload.char_indices().nth(EXCERPT_CHARS) {
        Some((idx, _)) => &payload[..idx],
        None => payload,
    }
}
