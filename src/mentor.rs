use std::sync::Arc;

use serde::Serialize;

use crate::compose;
use crate::error::AppError;
use crate::gemini::AnalysisModel;
use crate::images::ImageFetcher;
use crate::store::{self, ImageRecordStore};
use crate::tts::SpeechService;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorReport {
    pub analysis: String,
    pub audio_url: String,
}

/// Runs the chart-analysis pipeline: records → images → model → speech.
pub struct MentorService {
    store: Arc<dyn ImageRecordStore>,
    fetcher: ImageFetcher,
    model: Arc<dyn AnalysisModel>,
    speech: SpeechService,
    instruction: String,
    record_limit: usize,
    audio_route: String,
}

impl MentorService {
    pub fn new(
        store: Arc<dyn ImageRecordStore>,
        fetcher: ImageFetcher,
        model: Arc<dyn AnalysisModel>,
        speech: SpeechService,
        instruction: String,
        record_limit: usize,
        audio_file_name: &str,
    ) -> Self {
        Self {
            store,
            fetcher,
            model,
            speech,
            instruction,
            record_limit,
            audio_route: format!("/{}", audio_file_name.trim_start_matches('/')),
        }
    }

    pub async fn run(&self) -> Result<MentorReport, AppError> {
        // 1. Latest chart references
        let urls = store::fetch_latest_image_urls(self.store.as_ref(), self.record_limit).await;
        if urls.is_empty() {
            return Err(AppError::NoImages);
        }

        // 2. Download what we can
        let payloads = self.fetcher.fetch_and_encode(&urls).await;

        // 3. Instruction first, then images
        let request = compose::compose(&self.instruction, payloads);

        // 4. Analysis text
        let analysis = self.model.analyze(&request).await?;

        // 5. Speech, best effort
        self.speech.speak_to_artifact(&analysis).await;

        Ok(MentorReport {
            analysis,
            audio_url: self.audio_url(),
        })
    }

    /// Audio route with a cache-busting timestamp.
    fn audio_url(&self) -> String {
        format!("{}?t={}", self.audio_route, chrono::Utc::now().timestamp_millis())
    }
}
