pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub use mongo::MongoImageStore;

/// A chart screenshot reference written by the ingestion job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub batch_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime>,
}

/// Read-only access to stored image records.
#[async_trait]
pub trait ImageRecordStore: Send + Sync {
    /// Return at most `limit` records, newest first.
    async fn latest_records(&self, limit: usize) -> Result<Vec<ImageRecord>, AppError>;
}

/// Image URLs of the newest records. Store failures degrade to an empty list.
pub async fn fetch_latest_image_urls(store: &dyn ImageRecordStore, limit: usize) -> Vec<String> {
    let records = match store.latest_records(limit).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching image records");
            return Vec::new();
        }
    };

    let total = records.len();
    if let Some(newest) = records.first() {
        tracing::info!(
            symbol = newest.symbol.as_deref().unwrap_or("-"),
            timeframe = newest.timeframe.as_deref().unwrap_or("-"),
            batch_id = newest.batch_id.as_deref().unwrap_or("-"),
            timestamp = ?newest.timestamp,
            count = total,
            "Latest image records"
        );
    }

    let urls: Vec<String> = records
        .into_iter()
        .take(limit)
        .filter_map(|record| record.image_url)
        .filter(|url| !url.trim().is_empty())
        .collect();

    if urls.len() < total {
        tracing::warn!(
            total,
            usable = urls.len(),
            "Skipped image records without an image URL"
        );
    }
    tracing::debug!(count = urls.len(), "Fetched latest image URLs");

    urls
}
