//! Poll driver: list the catalog, enrich and persist each item, sleep, repeat.
//!
//! The driver is a small state machine:
//!
//! ```text
//! Idle -> Listing -> (per item: detail, merge, append)* -> Sleeping -> Idle
//!   \________________________ shutdown ________________________/-> Stopped
//! ```
//!
//! Per-item failures are logged and skipped. Anything that escapes a cycle,
//! including a panic, is caught at [`PollDriver::guarded_cycle`] and the
//! driver still sleeps the full interval before listing again. Nothing is
//! retried inside a cycle.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use anyhow::Context;
use futures::FutureExt;
use harvest_core::{AppConfig, ProductSummary};
use harvest_scraper::types::excerpt;
use harvest_scraper::{merge_product, CatalogClient, ScraperError};
use harvest_store::DailyStore;
use serde_json::Value;
use tokio::sync::watch;

use crate::shutdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollState {
    Idle,
    Listing,
    Sleeping,
    Stopped,
}

/// Counts for one completed cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CycleReport {
    pub listed: usize,
    pub persisted: usize,
    /// Items without a permalink.
    pub skipped: usize,
    pub failed: usize,
}

enum ItemOutcome {
    Persisted,
    Skipped,
    Failed,
}

pub(crate) struct PollDriver {
    client: CatalogClient,
    store: DailyStore,
    poll_interval: Duration,
    item_delay: Duration,
}

impl PollDriver {
    pub(crate) fn new(
        client: CatalogClient,
        store: DailyStore,
        poll_interval: Duration,
        item_delay: Duration,
    ) -> Self {
        Self {
            client,
            store,
            poll_interval,
            item_delay,
        }
    }

    /// # Errors
    ///
    /// Returns [`ScraperError`] if the HTTP client cannot be built from the
    /// configured headers.
    pub(crate) fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Ok(Self::new(
            CatalogClient::new(config)?,
            DailyStore::new(&config.data_dir),
            Duration::from_secs(config.poll_interval_secs),
            Duration::from_millis(config.item_delay_ms),
        ))
    }

    /// Runs cycles until `shutdown` is set.
    pub(crate) async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut state = PollState::Idle;
        loop {
            state = match state {
                PollState::Idle => {
                    if *shutdown.borrow() {
                        PollState::Stopped
                    } else {
                        PollState::Listing
                    }
                }
                PollState::Listing => {
                    self.guarded_cycle(&shutdown).await;
                    if *shutdown.borrow() {
                        PollState::Stopped
                    } else {
                        PollState::Sleeping
                    }
                }
                PollState::Sleeping => self.sleep(&mut shutdown).await,
                PollState::Stopped => {
                    tracing::info!("harvester stopped");
                    return;
                }
            };
        }
    }

    /// Runs one cycle behind the error boundary. Returns `None` when the
    /// cycle failed or panicked.
    pub(crate) async fn guarded_cycle(
        &self,
        shutdown: &watch::Receiver<bool>,
    ) -> Option<CycleReport> {
        match AssertUnwindSafe(self.run_cycle(shutdown))
            .catch_unwind()
            .await
        {
            Ok(Ok(report)) => {
                tracing::info!(
                    listed = report.listed,
                    persisted = report.persisted,
                    skipped = report.skipped,
                    failed = report.failed,
                    "finished processing products"
                );
                Some(report)
            }
            Ok(Err(e)) => {
                tracing::error!(error = format!("{e:#}"), "poll cycle failed");
                None
            }
            Err(panic) => {
                tracing::error!(panic = panic_message(&*panic), "poll cycle panicked");
                None
            }
        }
    }

    /// Lists the catalog and processes every entry in order.
    ///
    /// An empty listing is not an error. The shutdown flag is checked before
    /// each item; a request already in flight is allowed to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing call fails.
    pub(crate) async fn run_cycle(
        &self,
        shutdown: &watch::Receiver<bool>,
    ) -> anyhow::Result<CycleReport> {
        tracing::info!("fetching product list");
        let listing = self
            .client
            .list_products()
            .await
            .context("catalog listing failed")?;

        let mut report = CycleReport {
            listed: listing.total_count,
            ..CycleReport::default()
        };

        if listing.is_empty() {
            tracing::warn!("no products were retrieved");
            return Ok(report);
        }
        tracing::info!(count = listing.total_count, "found products in list view");

        for raw in &listing.products {
            if *shutdown.borrow() {
                tracing::info!("shutdown requested, leaving the rest of the listing");
                break;
            }

            match self.process_item(raw).await {
                ItemOutcome::Persisted => report.persisted += 1,
                ItemOutcome::Skipped => report.skipped += 1,
                ItemOutcome::Failed => report.failed += 1,
            }

            if !self.item_delay.is_zero() {
                tokio::time::sleep(self.item_delay).await;
            }
        }

        Ok(report)
    }

    async fn process_item(&self, raw: &Value) -> ItemOutcome {
        let product_id = item_id(raw);

        let summary = match ProductSummary::from_value(raw) {
            Ok(summary) => summary,
            Err(e) => {
                let payload = raw.to_string();
                tracing::error!(
                    %product_id,
                    error = %e,
                    payload = excerpt(&payload),
                    "listing entry does not match the summary shape"
                );
                return ItemOutcome::Failed;
            }
        };

        if summary.permalink.is_none() {
            tracing::warn!(%product_id, "skipping product without permalink");
            return ItemOutcome::Skipped;
        }

        match self.enrich_and_store(&summary).await {
            Ok(total_products) => {
                tracing::info!(%product_id, total_products, "saved product");
                ItemOutcome::Persisted
            }
            Err(e) => {
                tracing::error!(
                    %product_id,
                    error = format!("{e:#}"),
                    "error processing product"
                );
                ItemOutcome::Failed
            }
        }
    }

    async fn enrich_and_store(&self, summary: &ProductSummary) -> anyhow::Result<usize> {
        let detail = self.client.fetch_detail(summary).await?;
        let product = merge_product(summary, &detail)?;
        let total = self.store.append(product).await?;
        Ok(total)
    }

    async fn sleep(&self, shutdown: &mut watch::Receiver<bool>) -> PollState {
        tracing::info!(
            secs = self.poll_interval.as_secs(),
            "waiting before next scrape"
        );
        tokio::select! {
            () = tokio::time::sleep(self.poll_interval) => PollState::Idle,
            () = shutdown::requested(shutdown) => PollState::Stopped,
        }
    }
}

/// Best-effort id for log lines: the raw `id` field, or `"unknown"`.
fn item_id(raw: &Value) -> String {
    match raw.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
#[path = "poll_test.rs"]
mod tests;
