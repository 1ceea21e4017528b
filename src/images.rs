use base64::{engine::general_purpose, Engine as _};
use futures::future::join_all;
use serde::Serialize;

use crate::error::AppError;

pub const CHART_MIME_TYPE: &str = "image/png";

/// A downloaded chart image, base64-encoded for inline model input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            mime_type: CHART_MIME_TYPE.to_string(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }
}

pub struct ImageFetcher {
    http: reqwest::Client,
}

impl ImageFetcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Download every URL concurrently. Failed downloads are logged and left out;
    /// the remaining payloads keep the order of `urls`.
    pub async fn fetch_and_encode(&self, urls: &[String]) -> Vec<ImagePayload> {
        let downloads = urls.iter().map(|url| self.download(url));
        let results = join_all(downloads).await;

        let mut payloads = Vec::with_capacity(urls.len());
        for (url, result) in urls.iter().zip(results) {
            match result {
                Ok(bytes) => payloads.push(ImagePayload::from_bytes(&bytes)),
                Err(e) => tracing::error!(%url, error = %e, "Error downloading image"),
            }
        }

        tracing::info!(
            requested = urls.len(),
            downloaded = payloads.len(),
            "Fetched chart images"
        );
        payloads
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::ImageDownload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ImageDownload(format!("{} returned {}", url, status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ImageDownload(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
