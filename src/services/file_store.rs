use std::io;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use chrono::Utc;
use futures_util::{Stream, StreamExt};
use thiserror::Error;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum FileStoreError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Flat directory of uploaded files. The directory listing is the only index.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_dir(&self) -> Result<(), FileStoreError> {
        fs::create_dir_all(&self.root).await?;
        info!("Upload directory ready at {}", self.root.display());
        Ok(())
    }

    /// Writes `body` to a new file named `<nanos>-<basename>` and returns its path.
    pub async fn save<S, E>(&self, original_name: &str, body: S) -> Result<PathBuf, FileStoreError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let path = self
            .root
            .join(format!("{}-{}", stamp, upload_basename(original_name)));

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        let mut body = std::pin::pin!(body);
        let mut written = 0usize;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(io::Error::other)?;
            file.write_all(&chunk).await?;
            written += chunk.len();
        }
        file.flush().await?;

        debug!("Stored {} bytes at {}", written, path.display());
        Ok(path)
    }

    /// Names of the non-directory entries, sorted.
    pub async fn list(&self) -> Result<Vec<String>, FileStoreError> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// Opens a stored file for streaming to a client.
    pub async fn open(&self, name: &str) -> Result<File, FileStoreError> {
        let path = self.resolve(name)?;
        let not_found = || FileStoreError::NotFound(name.to_string());

        let file = File::open(&path).await.map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => not_found(),
            _ => err.into(),
        })?;
        if !file.metadata().await?.is_file() {
            return Err(not_found());
        }
        Ok(file)
    }

    /// Removes the file. A missing file is an error, not a no-op.
    pub async fn remove(&self, name: &str) -> Result<(), FileStoreError> {
        let path = self.resolve(name)?;
        fs::remove_file(&path).await?;
        info!("Deleted {}", path.display());
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, FileStoreError> {
        validate_file_name(name)?;
        Ok(self.root.join(name))
    }
}

/// Rejects names that could escape the upload directory.
pub fn validate_file_name(name: &str) -> Result<(), FileStoreError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(FileStoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Last path component of a client-supplied name.
fn upload_basename(original_name: &str) -> &str {
    match original_name.rsplit(['/', '\\']).next() {
        Some(base) if !base.is_empty() && base != "." && base != ".." => base,
        _ => "upload",
    }
}
