use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod compose;
mod config;
mod error;
mod gemini;
mod images;
mod mentor;
mod screenshots;
mod store;
mod tts;

#[cfg(test)]
mod test_utils;

use api::routes::{create_router, AppState};
use config::AppConfig;
use error::AppError;
use gemini::GeminiClient;
use images::ImageFetcher;
use mentor::MentorService;
use store::MongoImageStore;
use tts::{AudioArtifact, OpenAiSpeech, SpeechService};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration from environment
    let config = AppConfig::from_env()?;
    let instruction = config::load_instruction_template(&config.instruction_template_path)?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {}", e)))?;

    tracing::info!("Chart Mentor v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!(
        database = %config.mongo.database,
        record_limit = config.record_limit,
        static_dir = %config.static_dir.display(),
        allowed_origin = ?config.allowed_origin,
        "Loaded configuration"
    );

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;

    // Create pipeline
    let speech = SpeechService::new(
        Arc::new(OpenAiSpeech::new(http.clone(), config.speech.clone())),
        AudioArtifact::new(config.audio_path()),
    );
    tracing::info!("Audio artifact: {}", speech.artifact_path().display());

    let mentor = MentorService::new(
        Arc::new(MongoImageStore::new(config.mongo.clone())),
        ImageFetcher::new(http.clone()),
        Arc::new(GeminiClient::new(http, config.gemini.clone())),
        speech,
        instruction,
        config.record_limit,
        &config.audio_file_name,
    );

    // Create app state
    let state = Arc::new(AppState {
        mentor,
        static_dir: config.static_dir.clone(),
        allowed_origin: config.allowed_origin.clone(),
    });

    // Create router
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
