//! Date-partitioned JSON store for enriched catalog records.

mod daily;

pub use daily::{local_today, DailyStore, FILE_PREFIX};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse daily catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize daily catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}
