pub mod types;

use async_trait::async_trait;

use crate::compose::AnalysisRequest;
use crate::config::GeminiConfig;
use crate::error::AppError;

pub use types::{GenerateContentRequest, GenerateContentResponse};

/// A multimodal text-generation backend.
#[async_trait]
pub trait AnalysisModel: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String, AppError>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, config: GeminiConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl AnalysisModel for GeminiClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String, AppError> {
        let body = GenerateContentRequest::from(request);

        tracing::info!(
            model = %self.config.model,
            images = request.image_count(),
            "Requesting chart analysis"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Model(format!("Request failed: {}", e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Model(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let detail = String::from_utf8_lossy(&bytes);
            return Err(AppError::Model(format!("{} returned {}: {}", self.config.model, status, detail)));
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)?;
        let text = parsed.text().ok_or_else(|| {
            AppError::Model(format!(
                "Response contained no text (finish reason: {})",
                parsed.finish_reason().unwrap_or("unknown")
            ))
        })?;

        tracing::debug!(chars = text.len(), "Received chart analysis");
        Ok(text)
    }
}
