use async_trait::async_trait;
use serde::Serialize;

use super::SpeechSynthesizer;
use crate::config::SpeechConfig;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

/// OpenAI `audio/speech` client. Returns mp3 bytes.
pub struct OpenAiSpeech {
    http: reqwest::Client,
    config: SpeechConfig,
}

impl OpenAiSpeech {
    pub fn new(http: reqwest::Client, config: SpeechConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, AppError> {
        let url = format!("{}/v1/audio/speech", self.config.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&SpeechRequest {
                model: &self.config.model,
                voice: &self.config.voice,
                input: text,
            })
            .send()
            .await
            .map_err(|e| AppError::Speech(format!("Request failed: {}", e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Speech(format!("Failed to read audio: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::Speech(format!(
                "Speech service returned {}: {}",
                status,
                String::from_utf8_lossy(&bytes)
            )));
        }

        Ok(bytes.to_vec())
    }
}
