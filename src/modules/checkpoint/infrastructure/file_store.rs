//! JSON file checkpoint, replaced atomically through a sibling temp file

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::modules::checkpoint::domain::{Checkpoint, CheckpointStore};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_info, log_warn};

pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "checkpoint".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// `Ok(None)` when there is no snapshot on disk
    pub async fn try_load(&self) -> AppResult<Option<Checkpoint>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let checkpoint = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::CheckpointError(format!("corrupt snapshot {}: {}", self.path.display(), e))
        })?;
        Ok(Some(checkpoint))
    }

    pub async fn try_save(&self, checkpoint: &Checkpoint) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(checkpoint)?;
        let temp = self.temp_path();

        tokio::fs::write(&temp, &json).await?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }

    pub async fn try_clear(&self) -> AppResult<bool> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn load(&self) -> Checkpoint {
        match self.try_load().await {
            Ok(Some(checkpoint)) => {
                log_info!(
                    "Checkpoint: loaded {} previously collected anime from {}",
                    checkpoint.len(),
                    self.path.display()
                );
                checkpoint
            }
            Ok(None) => Checkpoint::empty(),
            Err(e) => {
                log_warn!("Checkpoint: ignoring unreadable snapshot: {}", e);
                Checkpoint::empty()
            }
        }
    }

    async fn save(&self, checkpoint: &Checkpoint) {
        match self.try_save(checkpoint).await {
            Ok(()) => log_info!(
                "Checkpoint: saved ({} anime in total)",
                checkpoint.len()
            ),
            Err(e) => log_warn!(
                "Checkpoint: failed to write {}: {}",
                self.path.display(),
                e
            ),
        }
    }

    async fn clear(&self) {
        match self.try_clear().await {
            Ok(true) => log_info!("Checkpoint: removed {}", self.path.display()),
            Ok(false) => {}
            Err(e) => log_warn!(
                "Checkpoint: failed to remove {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
