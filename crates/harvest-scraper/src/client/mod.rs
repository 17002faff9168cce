//! HTTP client for the catalogue listing and product detail endpoints.

mod detail;
mod listing;
mod urls;

use std::time::Duration;

use harvest_core::{AppConfig, CatalogFilter, ClientHeaders};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::types::excerpt;

/// Name of the client identifier header the catalogue API expects.
const CLIENT_ID_HEADER: &str = "moriarty";

/// HTTP client for the merchant catalogue API.
///
/// Every request carries the static header set from [`ClientHeaders`].
/// Non-2xx statuses, unparseable bodies, and missing envelope keys are all
/// returned as typed [`ScraperError`]s. Nothing is retried here; the poll
/// interval is the only retry mechanism.
pub struct CatalogClient {
    pub(super) client: Client,
    /// Listing endpoint; detail URLs append the permalink as one path segment.
    pub(super) base_url: Url,
    pub(super) filter: CatalogFilter,
}

impl CatalogClient {
    /// Creates a `CatalogClient` from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidHeader`] if a configured header value is
    /// not a valid HTTP header value, or [`ScraperError::Http`] if the
    /// underlying `reqwest::Client` cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::from_parts(
            config.catalog_base_url.clone(),
            config.filter.clone(),
            &config.headers,
            config.request_timeout_secs,
        )
    }

    /// Creates a `CatalogClient` from explicit parts.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::new`].
    pub fn from_parts(
        base_url: Url,
        filter: CatalogFilter,
        headers: &ClientHeaders,
        timeout_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(headers.user_agent.as_str())
            .default_headers(static_headers(headers)?)
            .build()?;
        Ok(Self {
            client,
            base_url,
            filter,
        })
    }

    /// Issues one GET and returns the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] — HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network or TLS failure.
    pub(super) async fn get_body(&self, url: Url) -> Result<String, ScraperError> {
        tracing::debug!(url = %url, "catalogue request");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Parses `body` as `T`, logging a payload excerpt when it does not fit.
pub(super) fn parse_body<T>(body: &str, context: &str) -> Result<T, ScraperError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str::<T>(body).map_err(|e| {
        tracing::warn!(
            context,
            error = %e,
            payload = excerpt(body),
            "response body does not match the expected envelope"
        );
        ScraperError::Deserialize {
            context: context.to_owned(),
            source: e,
        }
    })
}

fn static_headers(headers: &ClientHeaders) -> Result<HeaderMap, ScraperError> {
    let pairs: [(&'static str, &str); 6] = [
        ("accept", "application/json, text/plain, */*"),
        ("accept-language", "en-US,en;q=0.9"),
        (CLIENT_ID_HEADER, headers.client_id.as_str()),
        ("origin", headers.origin.as_str()),
        ("x-city-id", headers.city_id.as_str()),
        ("x-pincode", headers.pincode.as_str()),
    ];

    let mut map = HeaderMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        let value = HeaderValue::from_str(value).map_err(|e| ScraperError::InvalidHeader {
            name,
            reason: e.to_string(),
        })?;
        map.insert(HeaderName::from_static(name), value);
    }
    Ok(map)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
