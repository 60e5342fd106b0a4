//! Flat JSON-array metadata store. The whole file is the unit of read and
//! write; callers load-modify-save the entire collection.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

/// One uploaded video: on-disk name plus the public URL it is served under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("metadata store is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("metadata store i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle on the backing file. No caching: every call hits the filesystem.
pub struct MetaStore {
    path: PathBuf,
}

impl MetaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the full record list. A missing file reads as empty.
    pub async fn load_all(&self) -> Result<Vec<VideoRecord>, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw).map_err(StoreError::Corrupt),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Serialize the full record list and replace the file. Last writer wins.
    pub async fn save_all(&self, records: &[VideoRecord]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records).map_err(StoreError::Corrupt)?;
        fs::write(&self.path, raw).await?;
        Ok(())
    }

    /// Create the backing file with an empty array if it does not exist yet.
    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        if !fs::try_exists(&self.path).await? {
            self.save_all(&[]).await?;
        }
        Ok(())
    }
}
