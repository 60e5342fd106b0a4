//! Core video-API logic: filename sanitization, collision-free allocation,
//! and the load-modify-save sequences over the metadata store. No hyper
//! types here.

use std::path::{Path, PathBuf};

use multer::Field;
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};
use tracing::warn;

use crate::error::ApiError;
use crate::sys_videoapi::store::{MetaStore, VideoRecord};

/// Reduce a client-supplied filename to a safe base name: final path
/// segment only, then letters, digits, spaces, dots, hyphens and
/// underscores, with trailing whitespace trimmed. May come out empty.
pub fn sanitize_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let base = sanitize_filename::sanitize(base);
    let kept: String = base
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '-' | '_'))
        .collect();
    kept.trim_end().to_string()
}

/// Split at the last dot; a dot in first position belongs to the stem.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 => name.split_at(i),
        _ => (name, ""),
    }
}

/// The uploaded-video collection: bytes in `upload_dir`, metadata in the
/// store, public URLs under `/<dir-name>/`.
pub struct VideoLibrary {
    upload_dir: PathBuf,
    route_prefix: String,
    store: MetaStore,
    // Serializes every read-modify-write against the store, including the
    // allocator's existence probing. Single-process only.
    write_lock: Mutex<()>,
}

impl VideoLibrary {
    pub fn new(upload_dir: impl Into<PathBuf>, db_file: impl Into<PathBuf>) -> Self {
        let upload_dir = upload_dir.into();
        let route_prefix = format!(
            "/{}",
            upload_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "uploads".to_string())
        );
        Self {
            route_prefix,
            store: MetaStore::new(db_file),
            upload_dir,
            write_lock: Mutex::new(()),
        }
    }

    /// URL prefix uploaded files are served under, e.g. `/uploads`.
    pub fn route_prefix(&self) -> &str {
        &self.route_prefix
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Create the upload directory and the backing file if missing.
    pub async fn ensure_initialized(&self) -> Result<(), ApiError> {
        fs::create_dir_all(&self.upload_dir).await?;
        self.store.ensure_exists().await?;
        Ok(())
    }

    /// First free name in the upload directory: the sanitized name itself,
    /// then `stem_1.ext`, `stem_2.ext`, ...
    async fn allocate(&self, sanitized: &str) -> Result<String, ApiError> {
        let (stem, ext) = split_extension(sanitized);
        let mut candidate = sanitized.to_string();
        let mut counter = 1u32;
        while fs::try_exists(self.upload_dir.join(&candidate)).await? {
            candidate = format!("{stem}_{counter}{ext}");
            counter += 1;
        }
        Ok(candidate)
    }

    /// Persist one uploaded field and append its record to the store.
    ///
    /// Not transactional: a store failure after the file write leaves the
    /// file behind without a record.
    pub async fn add(&self, mut field: Field<'_>) -> Result<VideoRecord, ApiError> {
        let orig = field
            .file_name()
            .ok_or_else(|| ApiError::BadRequest("uploaded file has no filename".to_string()))?
            .to_owned();
        let name = sanitize_name(&orig);
        if name.is_empty() {
            return Err(ApiError::BadRequest(format!("invalid filename: {orig:?}")));
        }

        let _guard = self.write_lock.lock().await;
        let name = self.allocate(&name).await?;
        let path = self.upload_dir.join(&name);
        let mut file = fs::File::create(&path).await?;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        let record = VideoRecord {
            url: format!("{}/{}", self.route_prefix, name),
            filename: name,
        };
        let mut records = self.store.load_all().await?;
        records.push(record.clone());
        self.store.save_all(&records).await?;
        Ok(record)
    }

    /// Full record list, store order.
    pub async fn list(&self) -> Result<Vec<VideoRecord>, ApiError> {
        Ok(self.store.load_all().await?)
    }

    /// Drop every record matching `filename` exactly, then the file itself.
    /// A record with no file is tolerated; an unknown name is `NotFound`
    /// and mutates nothing.
    pub async fn remove(&self, filename: &str) -> Result<(), ApiError> {
        if filename.is_empty() {
            return Err(ApiError::BadRequest("filename required".to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let records = self.store.load_all().await?;
        let kept: Vec<VideoRecord> = records
            .iter()
            .filter(|r| r.filename != filename)
            .cloned()
            .collect();
        if kept.len() == records.len() {
            return Err(ApiError::NotFound(format!("no video named {filename:?}")));
        }
        self.store.save_all(&kept).await?;

        match fs::remove_file(self.upload_dir.join(filename)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(filename, "record removed but file was already gone");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
