//! Catalog record types shared by the scraper, the daily store, and the
//! poll driver.
//!
//! Field names follow the upstream API's camelCase JSON. Every struct
//! ignores unknown fields on decode; optional fields that are absent decode
//! as `None` and serialize back as `null`, so every persisted record carries
//! the full key set.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A price-like quantity with both a formatted and a numeric form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyAmount {
    /// Formatted for display, e.g. `"₹1,299"`.
    pub display_value: String,
    pub value: f64,
}

/// Pricing block as returned by the listing endpoint. Never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInfo {
    pub discount: MoneyAmount,
    pub discount_percentage: MoneyAmount,
    pub monthly_rental: MoneyAmount,
    pub strike_price: MoneyAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub aspect_ratio: f64,
    pub url: String,
}

/// One entry of the catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i64,
    pub title: String,
    /// Stable URL key used to fetch the detail record. Items without one
    /// cannot be enriched.
    #[serde(default)]
    pub permalink: Option<String>,
    pub available: bool,
    pub available_units: i64,
    pub line_of_product: String,
    pub vertical: String,
    pub pricing: PricingInfo,
    pub thumbnail: Image,
    pub heroes: Vec<Image>,
}

impl ProductSummary {
    /// Decodes a summary from one raw listing entry.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when a required field is missing or has
    /// the wrong type.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Serializes the summary into a JSON object keyed by the wire names.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails (a non-finite
    /// float, for instance).
    pub fn to_map(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(serde::ser::Error::custom(
                "product summary did not serialize to a JSON object",
            )),
        }
    }
}

/// Extended fields served by the per-item detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specifications: Option<Map<String, Value>>,
    #[serde(default)]
    pub variant_configuration: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub collection: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub features: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub dimensions: Option<Map<String, Value>>,
    #[serde(default)]
    pub additional_info: Option<Map<String, Value>>,
}

/// A listing summary enriched with its detail record. This is what the daily
/// store persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedProduct {
    #[serde(flatten)]
    pub summary: ProductSummary,
    #[serde(flatten)]
    pub detail: ProductDetail,
}

impl EnrichedProduct {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.summary.id
    }
}

/// All records harvested on one calendar day, as read back for reporting.
///
/// The store rewrites `total_products` as `products.len()` on every append.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCatalog {
    pub total_products: usize,
    pub products: Vec<EnrichedProduct>,
}

impl DailyCatalog {
    /// Number of distinct product ids in the day's records.
    #[must_use]
    pub fn distinct_ids(&self) -> usize {
        let mut ids: Vec<i64> = self.products.iter().map(EnrichedProduct::id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}
