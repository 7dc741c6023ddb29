//! Local-filesystem blob store.
//!
//! Objects live at `{root}/{bucket}/{key}` and are served back by the
//! router under `/storage/{bucket}/{key}`.

use std::path::{Component, Path, PathBuf};

use plantpal_core::storage::public_url;

/// Failures writing to the blob store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Bucket or key would escape the storage root.
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bucketed object storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Directory served under `/storage`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an object, creating parent directories, and return its public URL.
    ///
    /// An existing object under the same key is overwritten.
    pub async fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(bucket, key, size = bytes.len(), "Stored object");
        Ok(self.public_url(bucket, key))
    }

    /// Public URL of an object, whether or not it exists.
    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        public_url(&self.public_base_url, bucket, key)
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(bucket).join(key);
        let only_normal = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if bucket.is_empty() || key.is_empty() || !only_normal {
            return Err(StorageError::InvalidKey(format!("{bucket}/{key}")));
        }
        Ok(self.root.join(relative))
    }
}
