use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use harvest_core::{DailyCatalog, EnrichedProduct};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::StoreError;

/// File name prefix; the full name is `products_YYYYMMDD.json`.
pub const FILE_PREFIX: &str = "products_";

/// Today's date on the process-local clock.
#[must_use]
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// On-disk layout as seen by `append`. Records stay untyped, so entries this
/// crate did not write survive the rewrite unchanged.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCatalog {
    #[serde(default)]
    total_products: usize,
    products: Vec<Value>,
}

/// Append-only store holding one [`DailyCatalog`] file per calendar day.
///
/// Every append reads the day's file, pushes the record, and rewrites the
/// whole file through a temp-file rename. A missing file starts a fresh
/// catalog; an unreadable one, or one that is not a `{totalProducts,
/// products: [...]}` object, is replaced (with a warning). Existing records
/// are carried over as raw JSON, whatever their shape.
///
/// There is no locking: one writer process per data directory.
#[derive(Debug, Clone)]
pub struct DailyStore {
    dir: PathBuf,
    clock: fn() -> NaiveDate,
}

impl DailyStore {
    /// Creates a store rooted at `dir`, dated by the local clock.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, local_today)
    }

    /// Creates a store rooted at `dir` whose notion of "today" comes from `clock`.
    pub fn with_clock(dir: impl Into<PathBuf>, clock: fn() -> NaiveDate) -> Self {
        Self {
            dir: dir.into(),
            clock,
        }
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Path of the catalog file for `date`.
    #[must_use]
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{FILE_PREFIX}{}.json", date.format("%Y%m%d")))
    }

    /// Appends `record` to today's catalog and returns the new `totalProducts`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the data directory or the file cannot be
    /// written, or [`StoreError::Serialize`] if the catalog cannot be encoded.
    pub async fn append(&self, record: EnrichedProduct) -> Result<usize, StoreError> {
        self.append_on(self.today(), record).await
    }

    /// Appends `record` to the catalog for `date`.
    ///
    /// # Errors
    ///
    /// Same as [`DailyStore::append`].
    pub async fn append_on(
        &self,
        date: NaiveDate,
        record: EnrichedProduct,
    ) -> Result<usize, StoreError> {
        let path = self.path_for(date);
        let record = serde_json::to_value(record)?;
        let mut catalog = self.load_or_fresh(&path).await;
        catalog.products.push(record);
        catalog.total_products = catalog.products.len();
        self.write_atomic(&path, &catalog).await?;
        Ok(catalog.total_products)
    }

    /// Reads the catalog for `date` without any recovery.
    ///
    /// Returns `Ok(None)` when no file exists for that day.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read, or
    /// [`StoreError::Parse`] if its contents are not a valid catalog.
    pub async fn load(&self, date: NaiveDate) -> Result<Option<DailyCatalog>, StoreError> {
        let path = self.path_for(date);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(io_error(&path, source)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: path.display().to_string(),
                source,
            })
    }

    async fn load_or_fresh(&self, path: &Path) -> StoredCatalog {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return StoredCatalog::default();
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not read existing daily catalog, starting fresh"
                );
                return StoredCatalog::default();
            }
        };

        match serde_json::from_slice::<StoredCatalog>(&bytes) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not parse existing daily catalog, starting fresh"
                );
                StoredCatalog::default()
            }
        }
    }

    async fn write_atomic(&self, path: &Path, catalog: &StoredCatalog) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| io_error(&self.dir, source))?;

        let body = serde_json::to_vec_pretty(catalog)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &body)
            .await
            .map_err(|source| io_error(&tmp, source))?;
        if let Err(source) = tokio::fs::rename(&tmp, path).await {
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(io_error(path, source));
        }
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}
