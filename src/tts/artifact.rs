use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};

use crate::error::AppError;

/// The single audio file served to clients.
///
/// Replacements are serialized: a caller holds the [`ArtifactGuard`] from
/// deleting the old file until the new one has been renamed into place.
pub struct AudioArtifact {
    path: PathBuf,
    lock: Mutex<()>,
    sequence: AtomicU64,
}

pub struct ArtifactGuard<'a> {
    artifact: &'a AudioArtifact,
    _guard: MutexGuard<'a, ()>,
}

impl AudioArtifact {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn lock(&self) -> ArtifactGuard<'_> {
        ArtifactGuard {
            artifact: self,
            _guard: self.lock.lock().await,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.path
            .with_file_name(format!(".{}.{}-{}.tmp", name, std::process::id(), seq))
    }
}

impl ArtifactGuard<'_> {
    /// Delete the current file if there is one.
    pub async fn remove_existing(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.artifact.path).await {
            Ok(()) => {
                tracing::info!(path = %self.artifact.path.display(), "Old audio file deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `audio` to a temporary sibling and rename it over the artifact path.
    pub async fn write(&self, audio: &[u8]) -> Result<(), AppError> {
        let path = &self.artifact.path;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }

        let temp = self.artifact.temp_path();
        fs::write(&temp, audio).await?;

        if let Err(e) = fs::rename(&temp, path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }

        tracing::info!(path = %path.display(), bytes = audio.len(), "Audio file saved");
        Ok(())
    }
}
