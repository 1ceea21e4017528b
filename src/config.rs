use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::http::HeaderValue;

use crate::error::AppError;

/// Runtime configuration for the service.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo: MongoConfig,
    pub record_limit: usize,
    pub allowed_origin: Option<HeaderValue>,
    pub static_dir: PathBuf,
    pub audio_file_name: String,
    pub instruction_template_path: PathBuf,
    pub gemini: GeminiConfig,
    pub speech: SpeechConfig,
    pub http_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct SpeechConfig {
    pub api_key: String,
    pub model: String,
    pub voice: String,
    pub base_url: String,
}

impl AppConfig {
    /// Load configuration from the environment, reading a `.env` file first if present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };
        let or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = parse_number(&or_default("PORT", "5000"), "PORT")?;

        let record_limit: usize = parse_number(&or_default("RECORD_LIMIT", "7"), "RECORD_LIMIT")?;
        if record_limit == 0 {
            return Err(AppError::Config("RECORD_LIMIT must be at least 1".into()));
        }

        let http_timeout_secs: u64 =
            parse_number(&or_default("HTTP_TIMEOUT_SECS", "60"), "HTTP_TIMEOUT_SECS")?;

        let allowed_origin = match lookup("ALLOWED_ORIGIN").filter(|v| !v.trim().is_empty()) {
            Some(origin) => Some(HeaderValue::from_str(origin.trim()).map_err(|e| {
                AppError::Config(format!("ALLOWED_ORIGIN is not a valid origin: {}", e))
            })?),
            None => None,
        };

        Ok(Self {
            host: or_default("HOST", "0.0.0.0"),
            port,
            mongo: MongoConfig {
                uri: required("MONGO_URI")?,
                database: or_default("MONGO_DB_NAME", "sentineldb"),
                collection: or_default("MONGO_COLLECTION", "sentineldb_collection"),
            },
            record_limit,
            allowed_origin,
            static_dir: or_default("STATIC_DIR", "public").into(),
            audio_file_name: or_default("AUDIO_FILE_NAME", "analysis.mp3"),
            instruction_template_path: or_default(
                "INSTRUCTION_TEMPLATE_PATH",
                "prompts/ai_mentor.md",
            )
            .into(),
            gemini: GeminiConfig {
                api_key: required("GOOGLE_API_KEY")?,
                model: or_default("GEMINI_MODEL", "gemini-1.5-pro"),
                base_url: or_default(
                    "GEMINI_BASE_URL",
                    "https://generativelanguage.googleapis.com",
                ),
            },
            speech: SpeechConfig {
                api_key: required("OPENAI_API_KEY")?,
                model: or_default("TTS_MODEL", "tts-1"),
                voice: or_default("TTS_VOICE", "alloy"),
                base_url: or_default("OPENAI_BASE_URL", "https://api.openai.com"),
            },
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }

    pub fn audio_path(&self) -> PathBuf {
        self.static_dir.join(&self.audio_file_name)
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, key: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", key, value)))
}

/// Load the instruction template sent ahead of the chart images.
pub fn load_instruction_template(path: &Path) -> Result<String, AppError> {
    tracing::info!("Loading instruction template from: {}", path.display());

    let template = fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!(
            "Failed to read instruction template {}: {}",
            path.display(),
            e
        ))
    })?;

    let template = template.trim().to_string();
    if template.is_empty() {
        return Err(AppError::Config(format!(
            "Instruction template {} is empty",
            path.display()
        )));
    }

    Ok(template)
}
