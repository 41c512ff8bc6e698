//! Local directory backed store.

use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{ObjectStore, StoreError, validate_key};

/// A directory on the local filesystem used as a bucket.
///
/// Object keys map to paths relative to the root directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Creates a store rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(key.split('/').fold(self.root.clone(), |path, segment| path.join(segment)))
    }
}

fn io_error(key: impl Into<String>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        key: key.into(),
        source,
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        let mut pending = vec![(self.root.clone(), String::new())];

        while let Some((dir, prefix)) = pending.pop() {
            let mut entries = fs::read_dir(&dir)
                .await
                .map_err(|e| io_error(dir.display().to_string(), e))?;

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| io_error(dir.display().to_string(), e))?
            {
                let name = entry.file_name().to_string_lossy().into_owned();
                // In-flight writes from `put`
                if name.starts_with('.') {
                    continue;
                }
                let key = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}/{name}")
                };
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| io_error(key.clone(), e))?;

                if file_type.is_dir() {
                    pending.push((entry.path(), key));
                } else {
                    keys.push(key);
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(key.to_string())),
            Err(e) => Err(io_error(key, e)),
        }
    }

    async fn put(&self, key: &str, body: Bytes) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let parent = path.parent().unwrap_or(&self.root).to_path_buf();
        fs::create_dir_all(&parent)
            .await
            .map_err(|e| io_error(key, e))?;

        // Readers never observe a partial object.
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| StoreError::InvalidKey(key.to_string()))?;
        let staging = parent.join(format!(".{file_name}.partial"));
        fs::write(&staging, &body)
            .await
            .map_err(|e| io_error(key, e))?;
        fs::rename(&staging, &path)
            .await
            .map_err(|e| io_error(key, e))?;

        tracing::debug!(key, bytes = body.len(), root = %self.root.display(), "stored object");
        Ok(())
    }

    fn location(&self) -> String {
        format!("file://{}", self.root.display())
    }
}
