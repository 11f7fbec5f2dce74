use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::kernel::BaseObjectStorage;

/// Object storage on the local filesystem, served back under `/uploads/`
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Only plain relative keys are allowed
    fn resolve(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !safe {
            anyhow::bail!("Invalid object key: {}", key);
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BaseObjectStorage for LocalObjectStorage {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<String> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        tokio::fs::write(&path, &data)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!(key = %key, content_type = %content_type, size = data.len(), "Wrote object");
        Ok(format!("{}/uploads/{}", self.public_base_url, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_writes_file_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalObjectStorage::new(dir.path(), "http://localhost:8080/");

        let url = storage
            .put("posts/abc.png", "image/png", Bytes::from_static(b"png-bytes"))
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8080/uploads/posts/abc.png");
        let written = std::fs::read(dir.path().join("posts/abc.png")).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalObjectStorage::new(dir.path(), "http://localhost:8080");

        for key in ["../etc/passwd", "/abs.png", ""] {
            assert!(storage.put(key, "image/png", Bytes::new()).await.is_err());
        }
    }
}
