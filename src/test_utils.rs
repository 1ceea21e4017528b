//! Stubs for the outbound service seams.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::compose::AnalysisRequest;
use crate::error::AppError;
use crate::gemini::AnalysisModel;
use crate::images::ImageFetcher;
use crate::mentor::MentorService;
use crate::store::{ImageRecord, ImageRecordStore};
use crate::tts::{AudioArtifact, SpeechService, SpeechSynthesizer};

/// A pipeline over stubs, writing `analysis.mp3` into `dir`.
pub fn mentor_with(
    dir: &Path,
    store: Arc<StubStore>,
    model: Arc<StubModel>,
    speech: Arc<StubSpeech>,
) -> MentorService {
    MentorService::new(
        store,
        ImageFetcher::new(reqwest::Client::new()),
        model,
        SpeechService::new(speech, AudioArtifact::new(dir.join("analysis.mp3"))),
        "Analyze these charts.".to_string(),
        7,
        "analysis.mp3",
    )
}

pub fn record(url: &str) -> ImageRecord {
    ImageRecord {
        symbol: Some("NQ1!".to_string()),
        timeframe: Some("1".to_string()),
        image_url: Some(url.to_string()),
        batch_id: Some("batch-1".to_string()),
        timestamp: None,
    }
}

pub struct StubStore {
    records: Option<Vec<ImageRecord>>,
    calls: AtomicUsize,
    last_limit: Mutex<Option<usize>>,
}

impl StubStore {
    pub fn new(records: Vec<ImageRecord>) -> Self {
        Self {
            records: Some(records),
            calls: AtomicUsize::new(0),
            last_limit: Mutex::new(None),
        }
    }

    pub fn with_urls(urls: &[&str]) -> Self {
        Self::new(urls.iter().map(|u| record(u)).collect())
    }

    pub fn failing() -> Self {
        Self {
            records: None,
            calls: AtomicUsize::new(0),
            last_limit: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_limit(&self) -> Option<usize> {
        *self.last_limit.lock().unwrap()
    }
}

#[async_trait]
impl ImageRecordStore for StubStore {
    async fn latest_records(&self, limit: usize) -> Result<Vec<ImageRecord>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_limit.lock().unwrap() = Some(limit);
        match &self.records {
            Some(records) => Ok(records.iter().take(limit).cloned().collect()),
            None => Err(AppError::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "store unavailable",
            ))),
        }
    }
}

pub struct StubModel {
    reply: Option<String>,
    calls: AtomicUsize,
    image_counts: Mutex<Vec<usize>>,
    requests: Mutex<Vec<AnalysisRequest>>,
}

impl StubModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
            image_counts: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            ..Self::replying("")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn image_counts(&self) -> Vec<usize> {
        self.image_counts.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<AnalysisRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AnalysisModel for StubModel {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.image_counts.lock().unwrap().push(request.image_count());
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .ok_or_else(|| AppError::Model("stub model failure".into()))
    }
}

enum SpeechReply {
    Echo,
    Fixed(Vec<u8>),
    Fail,
}

pub struct StubSpeech {
    reply: SpeechReply,
    delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl StubSpeech {
    fn with_reply(reply: SpeechReply) -> Self {
        Self {
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Returns the script bytes as the "audio".
    pub fn echo() -> Self {
        Self::with_reply(SpeechReply::Echo)
    }

    pub fn returning(audio: &[u8]) -> Self {
        Self::with_reply(SpeechReply::Fixed(audio.to_vec()))
    }

    pub fn failing() -> Self {
        Self::with_reply(SpeechReply::Fail)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(text.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match &self.reply {
            SpeechReply::Echo => Ok(text.as_bytes().to_vec()),
            SpeechReply::Fixed(audio) => Ok(audio.clone()),
            SpeechReply::Fail => Err(AppError::Speech("stub speech failure".into())),
        }
    }
}
