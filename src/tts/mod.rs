pub mod artifact;
pub mod openai;
pub mod script;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;

pub use artifact::AudioArtifact;
pub use openai::OpenAiSpeech;

/// A text-to-speech backend.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, AppError>;
}

pub struct SpeechService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    artifact: AudioArtifact,
}

impl SpeechService {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, artifact: AudioArtifact) -> Self {
        Self {
            synthesizer,
            artifact,
        }
    }

    pub fn artifact_path(&self) -> &Path {
        self.artifact.path()
    }

    /// Replace the audio artifact with speech for `text`.
    ///
    /// Failures are logged and swallowed: the analysis is still delivered when
    /// audio could not be produced, and the artifact is then left absent.
    pub async fn speak_to_artifact(&self, text: &str) {
        if let Err(e) = self.replace_artifact(text).await {
            tracing::error!(error = %e, "Error generating audio");
        }
    }

    async fn replace_artifact(&self, text: &str) -> Result<(), AppError> {
        // 1. Take the artifact for the whole replacement
        let guard = self.artifact.lock().await;

        // 2. Drop the stale file
        guard.remove_existing().await?;

        // 3. Prepare script
        let script = script::prepare(text);
        if script.is_empty() {
            return Err(AppError::Speech("Nothing to speak".into()));
        }

        // 4. Synthesize
        let audio = self.synthesizer.synthesize(&script).await?;

        // 5. Write new file
        guard.write(&audio).await
    }
}
