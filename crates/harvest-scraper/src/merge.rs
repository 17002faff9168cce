//! List/detail merge policy.
//!
//! The listing's `pricing` block is authoritative: the detail endpoint's
//! pricing, when present, is dropped. Every other non-null detail key
//! overrides the summary's value.

use harvest_core::{EnrichedProduct, ProductSummary};
use serde_json::{Map, Value};

use crate::error::ScraperError;
use crate::types::excerpt;

const PRICING_KEY: &str = "pricing";

/// Merges one summary with its raw detail payload into an [`EnrichedProduct`].
///
/// # Errors
///
/// Returns [`ScraperError::Merge`] when the merged object does not decode as
/// an `EnrichedProduct`, e.g. because the detail payload overrode a required
/// field with a value of the wrong type.
pub fn merge_product(
    summary: &ProductSummary,
    detail: &Map<String, Value>,
) -> Result<EnrichedProduct, ScraperError> {
    let product_id = summary.id;
    let mut merged = summary
        .to_map()
        .map_err(|source| ScraperError::Merge { product_id, source })?;

    for (key, value) in detail {
        if value.is_null() || key == PRICING_KEY {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }

    let merged = Value::Object(merged);
    serde_json::from_value::<EnrichedProduct>(merged.clone()).map_err(|source| {
        let payload = merged.to_string();
        tracing::warn!(
            product_id,
            error = %source,
            payload = excerpt(&payload),
            "merged record failed validation"
        );
        ScraperError::Merge { product_id, source }
    })
}
