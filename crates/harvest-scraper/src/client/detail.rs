//! Per-item detail fetch for `CatalogClient`.

use harvest_core::ProductSummary;
use serde_json::{Map, Value};

use crate::error::ScraperError;
use crate::types::DetailEnvelope;

use super::{parse_body, CatalogClient};

impl CatalogClient {
    /// Fetches the raw detail payload (the `data` object) for one summary.
    ///
    /// The payload is returned untyped so the merge step can overlay every
    /// non-null key it carries.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::MissingPermalink`] — the summary has no permalink; no request is made.
    /// - [`ScraperError::NotFound`] / [`ScraperError::UnexpectedStatus`] — non-2xx.
    /// - [`ScraperError::Http`] — network or TLS failure.
    /// - [`ScraperError::Deserialize`] — body is not JSON, or `data` is not an object.
    /// - [`ScraperError::MissingField`] — `data` is absent or `null`.
    pub async fn fetch_detail(
        &self,
        summary: &ProductSummary,
    ) -> Result<Map<String, Value>, ScraperError> {
        let permalink = summary
            .permalink
            .as_deref()
            .ok_or(ScraperError::MissingPermalink {
                product_id: summary.id,
            })?;

        let url = self.detail_url(permalink)?;
        let context = format!("product detail for {permalink}");
        let body = self.get_body(url).await?;
        let envelope: DetailEnvelope = parse_body(&body, &context)?;

        envelope.data.ok_or(ScraperError::MissingField {
            context,
            field: "data",
        })
    }
}
