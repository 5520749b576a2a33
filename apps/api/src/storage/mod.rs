//! Artifact Store: project PDFs on the local filesystem.
//!
//! Layout: `<root>/<user_id>/project_<project_id>.pdf`.
//! Writes go to a temp file in the target directory and are linked into place
//! with a no-clobber persist: an existing file is never overwritten and a failed
//! write never leaves a partial `project_<id>.pdf` behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::user::UserId;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to overwrite existing artifact {0}")]
    AlreadyExists(PathBuf),

    #[error("storage task failed: {0}")]
    Task(String),
}

/// Where an artifact ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    pub file_name: String,
    pub path: PathBuf,
}

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn save(
        &self,
        user_id: UserId,
        project_id: Uuid,
        pdf: Bytes,
    ) -> Result<StoredArtifact, StorageError>;

    async fn load(&self, path: &Path) -> Result<Bytes, StorageError>;
}

pub fn artifact_file_name(project_id: Uuid) -> String {
    format!("project_{project_id}.pdf")
}

#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn user_dir(&self, user_id: UserId) -> PathBuf {
        self.root.join(user_id.to_string())
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn save(
        &self,
        user_id: UserId,
        project_id: Uuid,
        pdf: Bytes,
    ) -> Result<StoredArtifact, StorageError> {
        let dir = self.user_dir(user_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::Io {
                path: dir.clone(),
                source,
            })?;

        let file_name = artifact_file_name(project_id);
        let path = dir.join(&file_name);

        let target = path.clone();
        tokio::task::spawn_blocking(move || write_no_clobber(&dir, &target, &pdf))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))??;

        debug!("Stored artifact {}", path.display());
        Ok(StoredArtifact { file_name, path })
    }

    async fn load(&self, path: &Path) -> Result<Bytes, StorageError> {
        tokio::fs::read(path)
            .await
            .map(Bytes::from)
            .map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

fn write_no_clobber(dir: &Path, target: &Path, pdf: &[u8]) -> Result<(), StorageError> {
    let io_err = |source: std::io::Error| StorageError::Io {
        path: target.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".partial-")
        .tempfile_in(dir)
        .map_err(io_err)?;
    tmp.write_all(pdf).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;

    // The temp file is deleted when `e.file` drops.
    tmp.persist_noclobber(target).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            StorageError::AlreadyExists(target.to_path_buf())
        } else {
            io_err(e.error)
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_creates_user_directory_and_named_file() {
        let root = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(root.path());
        let project_id = Uuid::new_v4();

        let stored = store
            .save(1001, project_id, Bytes::from_static(b"%PDF-1.7 body"))
            .await
            .unwrap();

        assert_eq!(stored.file_name, format!("project_{project_id}.pdf"));
        assert_eq!(stored.path, root.path().join("1001").join(&stored.file_name));
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"%PDF-1.7 body");
    }

    #[tokio::test]
    async fn test_save_leaves_no_partial_files() {
        let root = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(root.path());

        store
            .save(5, Uuid::new_v4(), Bytes::from_static(b"%PDF"))
            .await
            .unwrap();

        let names: Vec<String> = std::fs::read_dir(store.user_dir(5))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("project_"));
    }

    #[tokio::test]
    async fn test_save_never_overwrites() {
        let root = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(root.path());
        let project_id = Uuid::new_v4();

        store
            .save(9, project_id, Bytes::from_static(b"first"))
            .await
            .unwrap();
        let err = store
            .save(9, project_id, Bytes::from_static(b"second"))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::AlreadyExists(_)), "got {err:?}");
        let path = store.user_dir(9).join(artifact_file_name(project_id));
        assert_eq!(std::fs::read(path).unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_save_fails_when_root_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();
        let store = FsArtifactStore::new(&blocker);

        let err = store
            .save(1, Uuid::new_v4(), Bytes::from_static(b"%PDF"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_load_reads_saved_artifact() {
        let root = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(root.path());

        let stored = store
            .save(3, Uuid::new_v4(), Bytes::from_static(b"%PDF-data"))
            .await
            .unwrap();

        let loaded = store.load(&stored.path).await.unwrap();
        assert_eq!(&loaded[..], b"%PDF-data");
    }
}
