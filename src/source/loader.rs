//! Error-absorbing dataset loader

use super::sources::DataSource;
use crate::types::Dataset;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Outcome of the most recent load
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    /// No load has completed yet
    #[default]
    Pending,
    /// Records were retrieved and decoded
    Loaded {
        /// Number of records in the dataset
        count: usize,
    },
    /// Retrieval or decoding failed; the dataset is empty
    Failed {
        /// Error message, for diagnostics only
        reason: String,
    },
}

impl LoadStatus {
    /// Whether the last load failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Dataset plus how it was obtained
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Loaded records (empty on failure)
    pub dataset: Dataset,
    /// Load outcome
    pub status: LoadStatus,
    /// When the load finished
    pub loaded_at: DateTime<Utc>,
}

/// Fetch a dataset, converting every failure into an empty one
///
/// Never returns an error: failures are logged and reported through
/// `LoadStatus::Failed`, with pagination behaving as for an empty dataset.
pub async fn load_dataset(source: &dyn DataSource) -> LoadReport {
    let (dataset, status) = match source.fetch().await {
        Ok(records) => {
            info!(source = %source.describe(), count = records.len(), "Loaded records");
            let count = records.len();
            (Dataset::from(records), LoadStatus::Loaded { count })
        }
        Err(e) => {
            error!(source = %source.describe(), error = %e, "Failed to load records");
            (
                Dataset::empty(),
                LoadStatus::Failed {
                    reason: e.to_string(),
                },
            )
        }
    };

    LoadReport {
        dataset,
        status,
        loaded_at: Utc::now(),
    }
}
