use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection};

use super::{ImageRecord, ImageRecordStore};
use crate::config::MongoConfig;
use crate::error::AppError;

/// MongoDB-backed record store. Connects per query and shuts the client down afterwards.
pub struct MongoImageStore {
    config: MongoConfig,
}

impl MongoImageStore {
    pub fn new(config: MongoConfig) -> Self {
        Self { config }
    }

    async fn query(&self, client: &Client, limit: usize) -> Result<Vec<ImageRecord>, AppError> {
        let collection: Collection<ImageRecord> = client
            .database(&self.config.database)
            .collection(&self.config.collection);

        let cursor = collection
            .find(doc! {})
            .sort(doc! { "timestamp": -1 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;

        let records: Vec<ImageRecord> = cursor.try_collect().await?;
        Ok(records)
    }
}

#[async_trait]
impl ImageRecordStore for MongoImageStore {
    async fn latest_records(&self, limit: usize) -> Result<Vec<ImageRecord>, AppError> {
        let client = Client::with_uri_str(&self.config.uri).await?;

        let result = self.query(&client, limit).await;

        // Release the connection whether or not the query succeeded
        client.shutdown().await;

        let records = result?;
        tracing::debug!(
            database = %self.config.database,
            collection = %self.config.collection,
            count = records.len(),
            "Queried latest image records"
        );
        Ok(records)
    }
}
