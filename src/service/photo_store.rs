use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

/// Raw photo payload as received from the caller.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    /// Size of the upload as sent, which exceeds `bytes.len()` when the
    /// payload was dropped for being too large.
    pub size: usize,
}

impl PhotoUpload {
    pub fn new(bytes: impl Into<Vec<u8>>, file_name: impl Into<String>) -> Self {
        let bytes = bytes.into();
        Self {
            size: bytes.len(),
            bytes,
            file_name: file_name.into(),
        }
    }

    /// An upload whose content was not kept; only its size is known.
    pub fn discarded(file_name: impl Into<String>, size: usize) -> Self {
        Self {
            bytes: Vec::new(),
            file_name: file_name.into(),
            size,
        }
    }
}

/// Stores uploaded employee photos as uniquely named files under one root directory.
#[derive(Debug, Clone)]
pub struct PhotoAssetStore {
    root: PathBuf,
    max_bytes: usize,
}

pub const DEFAULT_MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

impl PhotoAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_bytes: DEFAULT_MAX_PHOTO_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Largest photo accepted for upload.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn path_of(&self, stored_name: &str) -> io::Result<PathBuf> {
        if !is_plain_file_name(stored_name) {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("not a stored photo name: {stored_name:?}"),
            ));
        }
        Ok(self.root.join(stored_name))
    }

    /// Writes `bytes` under a fresh `<uuid>.<ext>` name and returns that name.
    /// The original extension is kept; an existing file is never overwritten.
    pub async fn save(&self, bytes: &[u8], original_file_name: &str) -> io::Result<String> {
        fs::create_dir_all(&self.root).await?;

        let stored_name = match extension_of(original_file_name) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        let path = self.root.join(&stored_name);

        let mut file = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        debug!(stored_name = %stored_name, size = bytes.len(), "Photo saved");
        Ok(stored_name)
    }

    /// Removes a stored photo; a file that is already gone is not an error.
    pub async fn delete(&self, stored_name: &str) -> io::Result<()> {
        let path = self.path_of(stored_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(stored_name = %stored_name, "Photo deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    let ext: String = ext
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    (!ext.is_empty()).then_some(ext)
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).file_name().is_some_and(|f| f == name)
}
